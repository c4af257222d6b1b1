use clap::{Arg, ArgAction, Command};

pub fn show_command() -> Command {
    Command::new("show")
        .about("Show current conditions and the cached forecast")
        .arg(
            Arg::new("refresh")
                .long("refresh")
                .help("Sync first if the cached forecast is running out, and refetch current conditions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("daily")
                .long("daily")
                .help("List one midday entry per day instead of 3-hour steps")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('n')
                .help("Number of upcoming entries to list")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(usize))
                .default_value("8"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn prefs_command() -> Command {
    Command::new("prefs")
        .about("Show or change user preferences")
        .arg(
            Arg::new("units")
                .long("units")
                .help("Temperature and wind units")
                .value_parser(["metric", "imperial"]),
        )
        .arg(
            Arg::new("notifications")
                .long("notifications")
                .help("Enable or disable weather notifications")
                .value_parser(["on", "off"]),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn notify_check_command() -> Command {
    Command::new("notify-check")
        .about("Explain whether a sync would notify right now, without notifying")
        .arg(
            Arg::new("at")
                .long("at")
                .help("Evaluate at this time instead of now (RFC 3339, e.g. 2024-05-01T14:00:00+03:00)")
                .value_name("TIME"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn breadcrumbs_command() -> Command {
    Command::new("breadcrumbs")
        .about("Print the debug trail of background sync runs")
        .arg(
            Arg::new("clear")
                .long("clear")
                .help("Erase the trail")
                .action(ArgAction::SetTrue),
        )
}
