mod global;
mod local;
mod sync;

#[cfg(test)]
mod tests;

use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(sync::sync_command())
        .subcommand(sync::watch_command())
        .subcommand(local::show_command())
        .subcommand(local::prefs_command())
        .subcommand(local::notify_check_command())
        .subcommand(local::breadcrumbs_command())
}
