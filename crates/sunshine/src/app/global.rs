use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("sunshine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep a local weather forecast fresh and notify when it changes")
        .long_about("Sunshine fetches the five-day forecast in the background, caches it under ~/.sunshine, and shows a desktop notification at most once every two hours, never at night and never while you are looking at the forecast. Run 'sunshine sync' from cron or a systemd timer, or leave 'sunshine watch' running.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
