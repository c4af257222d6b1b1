use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use clap::ArgMatches;
use tracing::{info, warn};

use sunshine_core::clock::Clock;
use sunshine_core::sync::{RefreshOutcome, SyncContext, last_sync};

use super::helpers::open_context;
use super::outcome_result;
use super::sync::print_report;
use crate::color;

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let once_if_needed = matches.get_flag("once-if-needed");

    info!(event = "cli.watch_started", once_if_needed = once_if_needed);

    let context = open_context()?;

    if once_if_needed {
        return run_once_if_needed(&context);
    }

    let mut planner = context.planner();
    let now = context.clock.now().to_utc();
    let last = last_sync(&context.store);
    warn_if_overdue(&context, last, now);

    let first_wait = planner.initial_wait(last, now);
    if !first_wait.is_zero() {
        info!(
            event = "cli.watch_sleeping",
            wait_secs = first_wait.as_secs(),
            reason = "recent_sync",
        );
        println!(
            "{}",
            color::cloud(&format!(
                "Last sync {}; next sync in {}.",
                format_local(last),
                format_wait(first_wait)
            ))
        );
        std::thread::sleep(first_wait);
    }

    loop {
        let report = context.job().run();
        print_report(&report);

        let Some(wait) = planner.next_wait(report.outcome) else {
            info!(event = "cli.watch_stopped", outcome = %report.outcome);
            return outcome_result(report.outcome);
        };

        info!(
            event = "cli.watch_sleeping",
            wait_secs = wait.as_secs(),
            failures = planner.failures(),
        );
        let message = match report.outcome {
            RefreshOutcome::RetryableFailure => format!("Retrying in {}.", format_wait(wait)),
            _ => format!("Next sync in {}.", format_wait(wait)),
        };
        println!("{}", color::cloud(&message));
        std::thread::sleep(wait);
    }
}

/// One sync, but only when the schedule says it is due and the cache is running out.
fn run_once_if_needed(context: &SyncContext) -> Result<(), Box<dyn std::error::Error>> {
    let now = context.clock.now().to_utc();
    let last = last_sync(&context.store);
    let schedule = context.schedule();
    warn_if_overdue(context, last, now);

    if !schedule.is_due(last, now) {
        println!(
            "Last sync {}; next one is not due for {}.",
            format_local(last),
            format_wait(schedule.wait_from(last, now))
        );
        info!(event = "cli.watch_skipped", reason = "not_due");
        return Ok(());
    }

    let needed = match context.cache.fetch_needed(now) {
        Ok(needed) => needed,
        Err(e) => {
            warn!(event = "cli.watch.cache_check_failed", error = %e);
            true
        }
    };
    if !needed {
        println!("Forecast is fresh; nothing to do.");
        info!(event = "cli.watch_skipped", reason = "cache_fresh");
        return Ok(());
    }

    let report = context.job().run();
    print_report(&report);
    outcome_result(report.outcome)
}

fn warn_if_overdue(context: &SyncContext, last: Option<DateTime<Utc>>, now: DateTime<Utc>) {
    if context.schedule().is_overdue(last, now) {
        warn!(
            event = "cli.watch.sync_overdue",
            last_sync = %format_local(last),
        );
    }
}

fn format_local(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format("%a %H:%M").to_string(),
        None => "never".to_string(),
    }
}

fn format_wait(wait: Duration) -> String {
    let secs = wait.as_secs();
    match (secs / 3600, (secs % 3600) / 60, secs % 60) {
        (0, 0, s) => format!("{}s", s),
        (0, m, 0) => format!("{}m", m),
        (0, m, s) => format!("{}m {}s", m, s),
        (h, 0, _) => format!("{}h", h),
        (h, m, _) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wait() {
        assert_eq!(format_wait(Duration::from_secs(30)), "30s");
        assert_eq!(format_wait(Duration::from_secs(120)), "2m");
        assert_eq!(format_wait(Duration::from_secs(150)), "2m 30s");
        assert_eq!(format_wait(Duration::from_secs(6 * 3600)), "6h");
        assert_eq!(format_wait(Duration::from_secs(5 * 3600 + 300)), "5h 5m");
    }

    #[test]
    fn test_format_local_never() {
        assert_eq!(format_local(None), "never");
    }
}
