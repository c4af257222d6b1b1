use sunshine_core::init_logging;

mod app;
pub(crate) mod color;
mod commands;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Handle --no-color before any output
    if matches.get_flag("no-color") {
        color::set_no_color();
    }

    let verbose = matches.get_flag("verbose");
    let quiet = !verbose;
    init_logging(quiet);

    if let Err(e) = commands::run_command(&matches) {
        // Error already printed to user via eprintln! in command handlers.
        // A sync outcome carries its own exit code for the scheduler.
        let code = e
            .downcast_ref::<commands::OutcomeExit>()
            .map_or(1, |exit| exit.code());
        drop(e);
        std::process::exit(code);
    }
}
