#[cfg(test)]
mod common;
#[cfg(test)]
mod call_success_tests;
#[cfg(test)]
mod call_rejection_tests;
#[cfg(test)]
mod validation_tests;
#[cfg(test)]
mod duplicate_call_tests;
#[cfg(test)]
mod echo_tests;
#[cfg(test)]
mod catalog_health_tests;
