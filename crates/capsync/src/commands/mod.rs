use clap::ArgMatches;
use tracing::error;

use capsync_core::events;

pub mod helpers;

mod accounts;
mod refresh;
mod schedule;
mod tick;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("tick", sub_matches)) => tick::handle_tick_command(sub_matches),
        Some(("refresh", sub_matches)) => refresh::handle_refresh_command(sub_matches),
        Some(("schedule", sub_matches)) => schedule::handle_schedule_command(sub_matches),
        Some(("accounts", sub_matches)) => accounts::handle_accounts_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
