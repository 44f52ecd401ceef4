pub mod api;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod telemetry;

#[cfg(feature = "server")]
pub mod health;

// Calling pipeline
#[cfg(feature = "server")]
pub mod caller;

#[cfg(feature = "server")]
pub mod dispatch;

#[cfg(feature = "server")]
pub mod inflight;

// HTTP surface
#[cfg(feature = "server")]
pub mod rate_limit;

#[cfg(feature = "server")]
pub mod rest;

#[cfg(feature = "server")]
pub mod openapi;
