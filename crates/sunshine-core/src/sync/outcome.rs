use serde::Serialize;

/// Result of one refresh attempt, as reported to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Success,
    /// Try again later; the scheduler owns the backoff.
    RetryableFailure,
    /// Retrying cannot help until the user changes something.
    FatalFailure,
}

impl RefreshOutcome {
    pub fn is_success(self) -> bool {
        self == RefreshOutcome::Success
    }

    pub fn is_retryable(self) -> bool {
        self == RefreshOutcome::RetryableFailure
    }
}

impl std::fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RefreshOutcome::Success => "success",
            RefreshOutcome::RetryableFailure => "retry",
            RefreshOutcome::FatalFailure => "failure",
        };
        write!(f, "{}", s)
    }
}
