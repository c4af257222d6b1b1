use chrono::{DateTime, Local, Utc};
use clap::ArgMatches;
use serde::Serialize;
use tracing::{info, warn};

use sunshine_core::clock::Clock;
use sunshine_core::prefs::UserPreferences;
use sunshine_core::sync::CurrentRefresh;
use sunshine_core::weather::format::{format_humidity, format_pressure};
use sunshine_core::weather::{
    Units, WeatherEntry, WeatherIcon, describe, format_temperature, format_wind,
};

use super::helpers::{open_context, print_json, report_error};
use crate::color;

#[derive(Serialize)]
struct EntryView {
    timestamp: DateTime<Utc>,
    temperature: String,
    description: String,
    icon: &'static str,
    humidity: String,
    pressure: String,
    wind: String,
}

impl EntryView {
    fn new(entry: &WeatherEntry, units: Units) -> Self {
        Self {
            timestamp: entry.timestamp,
            temperature: format_temperature(entry.temperature, units),
            description: describe(entry.condition_id).into_owned(),
            icon: WeatherIcon::resolve(&entry.icon_code, entry.condition_id).freedesktop_name(),
            humidity: format_humidity(entry.humidity),
            pressure: format_pressure(entry.pressure),
            wind: format_wind(entry.wind_speed, entry.wind_direction, units),
        }
    }
}

/// Where `current` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CurrentSource {
    /// The current weather endpoint, fetched within the last ten minutes.
    Observed,
    /// The forecast step covering now.
    Forecast,
}

#[derive(Serialize)]
struct ShowOutput {
    fetched_at: Option<DateTime<Utc>>,
    units: Units,
    current: Option<EntryView>,
    current_source: Option<CurrentSource>,
    upcoming: Vec<EntryView>,
    daily: Vec<EntryView>,
}

pub(crate) fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let refresh = matches.get_flag("refresh");
    let daily = matches.get_flag("daily");
    let limit = *matches.get_one::<usize>("limit").unwrap_or(&8);

    info!(
        event = "cli.show_started",
        json_output = json_output,
        refresh = refresh,
        daily = daily
    );

    let context = open_context()?;

    // The forecast is on screen: a sync started from here must not notify.
    let _screen = context.visibility.show();
    let local_now = context.clock.now();
    let now = local_now.to_utc();

    if refresh && context.cache.fetch_needed(now).unwrap_or(true) {
        let report = context.job().run();
        if !report.outcome.is_success() {
            warn!(event = "cli.show.refresh_failed", outcome = %report.outcome);
            eprintln!(
                "{} Could not refresh the forecast ({}); showing cached data.",
                color::warning("Warning:"),
                report.error.as_deref().unwrap_or("unknown error"),
            );
        }
    }

    if let CurrentRefresh::Failed(e) = context.current_refresh().run(refresh)
        && refresh
    {
        eprintln!(
            "{} Could not refresh current conditions ({}).",
            color::warning("Warning:"),
            e
        );
    }

    let cached = context
        .cache
        .load()
        .map_err(|e| report_error("Could not read the forecast cache", e))?;
    let units = UserPreferences::load(&context.store).units;

    let (current, current_source) = match cached.fresh_current(now) {
        Some(entry) => (Some(entry), Some(CurrentSource::Observed)),
        None => match cached.current(now) {
            Some(entry) => (Some(entry), Some(CurrentSource::Forecast)),
            None => (None, None),
        },
    };

    let output = ShowOutput {
        fetched_at: cached.fetched_at,
        units,
        current: current.map(|e| EntryView::new(e, units)),
        current_source,
        upcoming: cached
            .upcoming(now)
            .take(limit)
            .map(|e| EntryView::new(e, units))
            .collect(),
        daily: cached
            .midday(now, *local_now.offset())
            .into_iter()
            .map(|e| EntryView::new(e, units))
            .collect(),
    };

    info!(
        event = "cli.show_completed",
        entries = cached.entries.len(),
    );

    if json_output {
        return print_json(&output);
    }

    let Some(current) = &output.current else {
        println!("No forecast cached yet.");
        println!("{}", color::cloud("Run 'sunshine sync' to fetch one."));
        return Ok(());
    };

    let source = match output.current_source {
        Some(CurrentSource::Observed) => "now",
        _ => "forecast",
    };
    println!(
        "{}  {}  {}",
        color::bold(&color::sky(&current.temperature)),
        current.description,
        color::cloud(&format!("({})", source))
    );
    println!(
        "{}",
        color::cloud(&format!(
            "Humidity {}  Pressure {}  Wind {}",
            current.humidity, current.pressure, current.wind
        ))
    );
    if let Some(fetched_at) = output.fetched_at {
        println!(
            "{}",
            color::cloud(&format!(
                "Updated {}",
                fetched_at.with_timezone(&Local).format("%a %H:%M")
            ))
        );
    }

    let (rows, time_format) = if daily {
        (&output.daily, "%a %d %b")
    } else {
        (&output.upcoming, "%a %H:%M")
    };
    if !rows.is_empty() {
        println!();
        for view in rows {
            println!(
                "{}  {:>6}  {}",
                view.timestamp.with_timezone(&Local).format(time_format),
                color::sky(&view.temperature),
                view.description
            );
        }
    }

    Ok(())
}
