use clap::{Arg, ArgAction, Command};

pub fn sync_command() -> Command {
    Command::new("sync")
        .about("Fetch the forecast once, cache it, and notify if due")
        .long_about("Runs one background sync. Exit status tells the scheduler what to do next: 0 on success, 75 (EX_TEMPFAIL) when a retry may succeed, 1 when the configuration must be fixed first.")
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn watch_command() -> Command {
    Command::new("watch")
        .about("Sync periodically, backing off after failures")
        .arg(
            Arg::new("once-if-needed")
                .long("once-if-needed")
                .help("Sync once, and only if a sync is due and the cached forecast is running out")
                .action(ArgAction::SetTrue),
        )
}
