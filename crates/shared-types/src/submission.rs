use std::fmt;

/// Lifecycle of the submit trigger: `Idle -> Submitting -> Settled`.
///
/// Only one attempt may be in flight; `begin` refuses a second one until the
/// first has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Settled { succeeded: bool },
}

/// Returned by [`SubmissionState::begin`] while an attempt is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadySubmitting;

impl fmt::Display for AlreadySubmitting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a submission is already in flight")
    }
}

impl std::error::Error for AlreadySubmitting {}

impl SubmissionState {
    pub fn begin(&mut self) -> Result<(), AlreadySubmitting> {
        if self.is_busy() {
            return Err(AlreadySubmitting);
        }
        *self = SubmissionState::Submitting;
        Ok(())
    }

    /// Record the end of the pending attempt. Returns `false` (and leaves the
    /// state alone) when nothing was in flight.
    pub fn settle(&mut self, succeeded: bool) -> bool {
        if !self.is_busy() {
            return false;
        }
        *self = SubmissionState::Settled { succeeded };
        true
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}
