use chrono::{DateTime, FixedOffset};
use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use sunshine_core::clock::{Clock, FixedClock, SystemClock};
use sunshine_core::foreground::ForegroundTracker;
use sunshine_core::notify::{DesktopNotifier, NotificationGatekeeper, SkipReason};

use super::helpers::{load_config_with_warning, open_store, print_json, resolve_paths};
use crate::color;

#[derive(Serialize)]
struct CheckOutput {
    at: DateTime<FixedOffset>,
    would_notify: bool,
    reason: Option<SkipReason>,
    backend: Option<&'static str>,
}

pub(crate) fn handle_notify_check_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let at = match matches.get_one::<String>("at") {
        Some(raw) => Some(DateTime::parse_from_rfc3339(raw).map_err(|e| {
            eprintln!(
                "{} Invalid --at '{}': {}",
                color::error("Error:"),
                raw,
                e
            );
            e
        })?),
        None => None,
    };

    info!(event = "cli.notify_check_started", at = ?at);

    let config = load_config_with_warning();
    let paths = resolve_paths()?;
    let store = open_store(&paths)?;

    let clock: Box<dyn Clock> = match at {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    };
    let notifier = DesktopNotifier::detect();
    let visibility = ForegroundTracker::new();
    let gatekeeper = NotificationGatekeeper::new(
        &store,
        &notifier,
        clock.as_ref(),
        &visibility,
        &config.notifications,
    );

    let verdict = gatekeeper.check();
    let output = CheckOutput {
        at: clock.now(),
        would_notify: verdict.is_ok(),
        reason: verdict.err(),
        backend: notifier.backend_name(),
    };

    info!(
        event = "cli.notify_check_completed",
        would_notify = output.would_notify,
        reason = ?output.reason,
    );

    if json_output {
        return print_json(&output);
    }

    println!("At:        {}", output.at.format("%Y-%m-%d %H:%M %:z"));
    match output.reason {
        None => println!("Verdict:   {}", color::leaf("would notify")),
        Some(reason) => println!("Verdict:   {} ({})", color::sun("would skip"), reason),
    }
    println!(
        "Backend:   {}",
        output
            .backend
            .map(str::to_string)
            .unwrap_or_else(|| color::cloud("none available"))
    );
    Ok(())
}
