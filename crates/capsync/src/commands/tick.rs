use clap::ArgMatches;
use tracing::{error, info};

use capsync_core::{CancelFlag, JobResult};

use super::helpers::Context;
use super::refresh::{into_exit_status, print_report};

pub(crate) fn handle_tick_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let force = matches.get_flag("force");
    let json_output = matches.get_flag("json");

    info!(event = "cli.tick_started", force = force);

    let ctx = Context::load();
    let manager = ctx.schedule_manager();
    let name = manager.request().name.clone();

    if !force {
        if !manager.is_enabled()? {
            info!(event = "cli.tick_skipped", name = %name, reason = "not_enabled");
            println!(
                "Schedule '{}' is not enabled. Run 'capsync schedule enable' first.",
                name
            );
            return Ok(());
        }

        if !manager.is_due()? {
            let next_run = manager.status()?.and_then(|r| r.next_run());
            info!(event = "cli.tick_skipped", name = %name, reason = "not_due");
            match next_run {
                Some(next_run) => println!("Not due yet. Next run after {}.", next_run),
                None => println!("Not due yet."),
            }
            return Ok(());
        }

        if !manager.request().constraints.satisfied() {
            info!(event = "cli.tick_skipped", name = %name, reason = "network_unavailable");
            println!("Network unavailable. Tick deferred.");
            return Ok(());
        }
    }

    let coordinator = ctx.coordinator()?;
    let report = manager.run_tick(&coordinator, &CancelFlag::new());

    print_report(&report, json_output)?;

    match report.result() {
        JobResult::Success => info!(
            event = "cli.tick_completed",
            name = %name,
            attempted = report.attempted,
            updated = report.updated
        ),
        JobResult::Failure => error!(
            event = "cli.tick_failed",
            name = %name,
            attempted = report.attempted,
            failed = report.failed
        ),
    }
    into_exit_status(&report)
}
