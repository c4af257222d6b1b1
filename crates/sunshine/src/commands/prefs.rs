use chrono::{DateTime, Utc};
use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use sunshine_core::prefs::keys::{ENABLE_NOTIFICATIONS, UNITS_METRIC};
use sunshine_core::prefs::{NotificationState, PreferenceStore, UserPreferences};
use sunshine_core::sync::last_sync;
use sunshine_core::weather::Units;

use super::helpers::{open_store, print_json, report_error, resolve_paths};
use crate::color;

#[derive(Serialize)]
struct PrefsOutput {
    notifications_enabled: bool,
    units: Units,
    last_notification: Option<DateTime<Utc>>,
    last_sync: Option<DateTime<Utc>>,
}

pub(crate) fn handle_prefs_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let units = matches
        .get_one::<String>("units")
        .map(|s| s.parse::<Units>())
        .transpose()?;
    let notifications = matches
        .get_one::<String>("notifications")
        .map(|s| s == "on");

    info!(
        event = "cli.prefs_started",
        units = ?units,
        notifications = ?notifications
    );

    let paths = resolve_paths()?;
    let store = open_store(&paths)?;

    if let Some(units) = units {
        store
            .put_bool(UNITS_METRIC, units.is_metric())
            .map_err(|e| report_error("Could not save units", e))?;
    }
    if let Some(enabled) = notifications {
        store
            .put_bool(ENABLE_NOTIFICATIONS, enabled)
            .map_err(|e| report_error("Could not save notification setting", e))?;
    }

    let prefs = UserPreferences::load(&store);
    let output = PrefsOutput {
        notifications_enabled: prefs.notifications_enabled,
        units: prefs.units,
        last_notification: NotificationState::load(&store).last_notification(),
        last_sync: last_sync(&store),
    };

    info!(
        event = "cli.prefs_completed",
        notifications_enabled = output.notifications_enabled,
        units = %output.units,
    );

    if json_output {
        return print_json(&output);
    }

    let on_off = if output.notifications_enabled {
        color::leaf("on")
    } else {
        color::cloud("off")
    };
    println!("Notifications:     {}", on_off);
    println!("Units:             {}", output.units);
    println!("Last notification: {}", format_time(output.last_notification));
    println!("Last sync:         {}", format_time(output.last_sync));
    Ok(())
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => color::cloud("never"),
    }
}
