use clap::ArgMatches;
use tracing::info;

use sunshine_core::prefs::Breadcrumbs;
use sunshine_core::prefs::breadcrumbs::{clear_trail, read_trail};

use super::helpers::{load_config_with_warning, open_store, report_error, resolve_paths};
use crate::color;

pub(crate) fn handle_breadcrumbs_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let clear = matches.get_flag("clear");

    info!(event = "cli.breadcrumbs_started", clear = clear);

    let config = load_config_with_warning();
    let paths = resolve_paths()?;
    let store = open_store(&paths)?;
    let recording = Breadcrumbs::new(&store, config.debug.breadcrumbs()).is_enabled();

    if clear {
        clear_trail(&store).map_err(|e| report_error("Could not clear breadcrumbs", e))?;
        println!("Breadcrumbs cleared.");
        return Ok(());
    }

    match read_trail(&store) {
        Some(trail) => println!("{}", trail),
        None => {
            println!("No breadcrumbs recorded.");
            if !recording {
                println!(
                    "{}",
                    color::cloud(
                        "Enable them with 'breadcrumbs = true' under [debug] in config.toml."
                    )
                );
            }
        }
    }
    Ok(())
}
