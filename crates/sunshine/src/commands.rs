use clap::ArgMatches;
use tracing::error;

use sunshine_core::sync::RefreshOutcome;

mod breadcrumbs;
mod helpers;
mod notify_check;
mod prefs;
mod show;
mod sync;
mod watch;

use breadcrumbs::handle_breadcrumbs_command;
use notify_check::handle_notify_check_command;
use prefs::handle_prefs_command;
use show::handle_show_command;
use sync::handle_sync_command;
use watch::handle_watch_command;

/// `EX_TEMPFAIL` from sysexits.h: temporary failure, try again later.
pub(crate) const EXIT_RETRY_LATER: i32 = 75;

/// A sync that finished without success. Carries the process exit code so
/// cron or systemd can tell "retry later" from "fix the configuration".
#[derive(Debug)]
pub(crate) struct OutcomeExit(pub RefreshOutcome);

impl OutcomeExit {
    pub(crate) fn code(&self) -> i32 {
        match self.0 {
            RefreshOutcome::Success => 0,
            RefreshOutcome::RetryableFailure => EXIT_RETRY_LATER,
            RefreshOutcome::FatalFailure => 1,
        }
    }
}

impl std::fmt::Display for OutcomeExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sync finished with outcome '{}'", self.0)
    }
}

impl std::error::Error for OutcomeExit {}

/// `Ok` on success, otherwise an [`OutcomeExit`] error.
pub(crate) fn outcome_result(outcome: RefreshOutcome) -> Result<(), Box<dyn std::error::Error>> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(Box::new(OutcomeExit(outcome)))
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("sync", sub_matches)) => handle_sync_command(sub_matches),
        Some(("watch", sub_matches)) => handle_watch_command(sub_matches),
        Some(("show", sub_matches)) => handle_show_command(sub_matches),
        Some(("prefs", sub_matches)) => handle_prefs_command(sub_matches),
        Some(("notify-check", sub_matches)) => handle_notify_check_command(sub_matches),
        Some(("breadcrumbs", sub_matches)) => handle_breadcrumbs_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(OutcomeExit(RefreshOutcome::Success).code(), 0);
        assert_eq!(OutcomeExit(RefreshOutcome::RetryableFailure).code(), 75);
        assert_eq!(OutcomeExit(RefreshOutcome::FatalFailure).code(), 1);
    }

    #[test]
    fn test_outcome_result_downcasts() {
        assert!(outcome_result(RefreshOutcome::Success).is_ok());

        let err = outcome_result(RefreshOutcome::RetryableFailure).unwrap_err();
        let exit = err.downcast_ref::<OutcomeExit>().unwrap();
        assert_eq!(exit.code(), EXIT_RETRY_LATER);
    }
}
