use clap::ArgMatches;
use tracing::info;

use sunshine_core::notify::NotifyDecision;
use sunshine_core::sync::{RefreshOutcome, SyncReport};

use super::helpers::{open_context, print_json};
use super::outcome_result;
use crate::color;

pub(crate) fn handle_sync_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.sync_started", json_output = json_output);

    let context = open_context()?;
    let report = context.job().run();

    if json_output {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    info!(
        event = "cli.sync_completed",
        outcome = %report.outcome,
        entries = report.entries,
    );
    outcome_result(report.outcome)
}

/// Human-readable summary of one sync run.
pub(crate) fn print_report(report: &SyncReport) {
    match report.outcome {
        RefreshOutcome::Success => {
            println!(
                "Sync: {} ({} forecast entries)",
                color::outcome(report.outcome),
                report.entries
            );
        }
        RefreshOutcome::RetryableFailure | RefreshOutcome::FatalFailure => {
            println!("Sync: {}", color::outcome(report.outcome));
            if let Some(error) = &report.error {
                eprintln!("{} {}", color::error("Error:"), error);
            }
            if report.outcome == RefreshOutcome::FatalFailure {
                eprintln!(
                    "{}",
                    color::hint(
                        "Tip: set [api] key and [location] city (or lat/lon) in ~/.sunshine/config.toml, or export SUNSHINE_API_KEY."
                    )
                );
            }
        }
    }

    match report.decision {
        Some(NotifyDecision::Dispatched { .. }) => {
            println!("Notification: {}", color::leaf("sent"));
        }
        Some(NotifyDecision::Skipped(reason)) => {
            println!("Notification: {} ({})", color::cloud("skipped"), reason);
        }
        None => {}
    }
}
