//! One background refresh attempt.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{error, info, warn};

use super::outcome::RefreshOutcome;
use crate::fetch::{FetchError, WeatherFetcher};
use crate::prefs::Breadcrumbs;
use crate::weather::Forecast;

/// Panic messages are cut to this many characters in the breadcrumb trail.
const MAX_CRUMB_MESSAGE_CHARS: usize = 40;

/// What one attempt produced: the outcome plus whatever the fetch returned.
#[derive(Debug)]
pub struct RefreshAttempt {
    pub outcome: RefreshOutcome,
    pub forecast: Option<Forecast>,
    pub error: Option<String>,
}

/// Performs exactly one fetch and maps its result to a [`RefreshOutcome`].
///
/// The task never backs off or retries by itself. A timed-out fetch is a
/// `RetryableFailure`, as is a fetcher that panics. Only a missing API key or
/// location is a `FatalFailure`.
pub struct RefreshTask<'a> {
    fetcher: &'a dyn WeatherFetcher,
    breadcrumbs: Breadcrumbs<'a>,
}

impl<'a> RefreshTask<'a> {
    pub fn new(fetcher: &'a dyn WeatherFetcher, breadcrumbs: Breadcrumbs<'a>) -> Self {
        Self {
            fetcher,
            breadcrumbs,
        }
    }

    pub fn run(&self) -> RefreshOutcome {
        self.attempt().outcome
    }

    pub fn attempt(&self) -> RefreshAttempt {
        info!(event = "core.sync.refresh_started");
        self.breadcrumbs.drop_crumb("wk");

        let result = catch_unwind(AssertUnwindSafe(|| self.fetcher.fetch()));

        match result {
            Ok(Ok(forecast)) => {
                info!(
                    event = "core.sync.refresh_completed",
                    entries = forecast.len()
                );
                self.breadcrumbs.drop_crumb("wkOk");
                RefreshAttempt {
                    outcome: RefreshOutcome::Success,
                    forecast: Some(forecast),
                    error: None,
                }
            }
            Ok(Err(e)) => self.failed(e),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(event = "core.sync.fetch_panicked", error = %message);
                let short: String = message.chars().take(MAX_CRUMB_MESSAGE_CHARS).collect();
                self.breadcrumbs.drop_crumb(&format!("wkEr:{}", short));
                RefreshAttempt {
                    outcome: RefreshOutcome::RetryableFailure,
                    forecast: None,
                    error: Some(message),
                }
            }
        }
    }

    fn failed(&self, e: FetchError) -> RefreshAttempt {
        let outcome = if e.is_retryable() {
            RefreshOutcome::RetryableFailure
        } else {
            RefreshOutcome::FatalFailure
        };

        let crumb = match &e {
            FetchError::Timeout { .. } => "wkTimeout",
            _ if outcome == RefreshOutcome::FatalFailure => "wkFatal",
            _ => "wkRetry",
        };
        self.breadcrumbs.drop_crumb(crumb);

        warn!(
            event = "core.sync.refresh_failed",
            outcome = %outcome,
            error = %e,
        );
        RefreshAttempt {
            outcome,
            forecast: None,
            error: Some(e.to_string()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::keys::SYNC_BREADCRUMBS;
    use crate::prefs::{MemoryPreferenceStore, PreferenceStore};
    use crate::weather::entry::sample_entry;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Script {
        Succeed,
        Fail(fn() -> FetchError),
        Panic,
    }

    struct ScriptedFetcher {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl WeatherFetcher for ScriptedFetcher {
        fn fetch(&self) -> Result<Forecast, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Succeed => Ok(Forecast::new(vec![sample_entry(
                    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                )])),
                Script::Fail(make) => Err(make()),
                Script::Panic => panic!("socket exploded"),
            }
        }
    }

    fn run_with(script: Script) -> (RefreshAttempt, MemoryPreferenceStore, usize) {
        let store = MemoryPreferenceStore::new();
        let fetcher = ScriptedFetcher::new(script);
        let attempt = RefreshTask::new(&fetcher, Breadcrumbs::new(&store, true)).attempt();
        let calls = fetcher.calls.load(Ordering::SeqCst);
        (attempt, store, calls)
    }

    fn trail(store: &MemoryPreferenceStore) -> String {
        store.get_string(SYNC_BREADCRUMBS, "")
    }

    #[test]
    fn test_success_returns_forecast() {
        let (attempt, store, calls) = run_with(Script::Succeed);
        assert_eq!(attempt.outcome, RefreshOutcome::Success);
        assert_eq!(attempt.forecast.map(|f| f.len()), Some(1));
        assert_eq!(calls, 1);
        assert_eq!(trail(&store), "sync wk wkOk");
    }

    #[test]
    fn test_every_reported_failure_is_retryable() {
        let failures: [fn() -> FetchError; 5] = [
            || FetchError::Network {
                message: "connection refused".to_string(),
            },
            || FetchError::HttpStatus {
                status: 503,
                message: "unavailable".to_string(),
            },
            || FetchError::Parse {
                message: "expected value".to_string(),
            },
            || FetchError::EmptyForecast,
            || FetchError::Internal {
                message: "io".to_string(),
            },
        ];
        for make in failures {
            let (attempt, _store, calls) = run_with(Script::Fail(make));
            assert_eq!(attempt.outcome, RefreshOutcome::RetryableFailure);
            assert!(attempt.forecast.is_none());
            assert_eq!(calls, 1);
        }
    }

    #[test]
    fn test_timeout_is_retryable_not_success() {
        let (attempt, store, _) = run_with(Script::Fail(|| FetchError::Timeout { secs: 10 }));
        assert_eq!(attempt.outcome, RefreshOutcome::RetryableFailure);
        assert_eq!(
            attempt.error.as_deref(),
            Some("Forecast request timed out after 10s")
        );
        assert_eq!(trail(&store), "sync wk wkTimeout");
    }

    #[test]
    fn test_not_configured_is_fatal() {
        let (attempt, store, _) = run_with(Script::Fail(|| FetchError::NotConfigured {
            message: "no API key".to_string(),
        }));
        assert_eq!(attempt.outcome, RefreshOutcome::FatalFailure);
        assert_eq!(trail(&store), "sync wk wkFatal");
    }

    #[test]
    fn test_panicking_fetcher_is_retryable() {
        let (attempt, store, _) = run_with(Script::Panic);
        assert_eq!(attempt.outcome, RefreshOutcome::RetryableFailure);
        assert_eq!(attempt.error.as_deref(), Some("socket exploded"));
        assert_eq!(trail(&store), "sync wk wkEr:socket exploded");
    }

    #[test]
    fn test_run_without_breadcrumbs_writes_nothing() {
        let store = MemoryPreferenceStore::new();
        let fetcher = ScriptedFetcher::new(Script::Succeed);
        let outcome = RefreshTask::new(&fetcher, Breadcrumbs::disabled(&store)).run();
        assert_eq!(outcome, RefreshOutcome::Success);
        assert_eq!(trail(&store), "");
    }
}
