use clap::ArgMatches;
use tracing::{error, info};

use capsync_core::schedule::{ScheduleManager, ScheduleState};

use super::helpers::Context;

pub(crate) fn handle_schedule_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load();
    let manager = ctx.schedule_manager();

    match matches.subcommand() {
        Some(("enable", _)) => handle_enable(&manager),
        Some(("disable", _)) => handle_disable(&manager),
        Some(("status", sub_matches)) => handle_status(&manager, sub_matches.get_flag("json")),
        _ => {
            error!(event = "cli.schedule_command_unknown");
            Err("Unknown schedule command".into())
        }
    }
}

fn handle_enable(manager: &ScheduleManager) -> Result<(), Box<dyn std::error::Error>> {
    let request = manager.request();
    info!(event = "cli.schedule_enable_started", name = %request.name);

    if let Err(e) = manager.enable() {
        eprintln!("❌ Failed to enable schedule '{}': {}", request.name, e);
        error!(event = "cli.schedule_enable_failed", name = %request.name, error = %e);
        return Err(e.into());
    }

    println!(
        "✅ Schedule '{}' enabled: every {}h{}",
        request.name,
        request.interval().as_secs() / 3600,
        if request.constraints.require_network {
            ", network required"
        } else {
            ""
        }
    );
    info!(event = "cli.schedule_enable_completed", name = %request.name);
    Ok(())
}

fn handle_disable(manager: &ScheduleManager) -> Result<(), Box<dyn std::error::Error>> {
    let name = &manager.request().name;
    info!(event = "cli.schedule_disable_started", name = %name);

    if let Err(e) = manager.disable() {
        eprintln!("❌ Failed to disable schedule '{}': {}", name, e);
        error!(event = "cli.schedule_disable_failed", name = %name, error = %e);
        return Err(e.into());
    }

    println!("Schedule '{}' disabled.", name);
    info!(event = "cli.schedule_disable_completed", name = %name);
    Ok(())
}

fn handle_status(
    manager: &ScheduleManager,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = manager.state()?;
    let registration = manager.status()?;

    if json_output {
        let output = serde_json::json!({
            "name": manager.request().name,
            "state": state,
            "registration": registration,
            "next_run": registration.as_ref().and_then(|r| r.next_run()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let name = &manager.request().name;
    match (state, registration) {
        (ScheduleState::Registered, Some(registration)) => {
            println!("Schedule: {}", name);
            println!("State:    registered");
            println!("Interval: {}h", registration.request.interval().as_secs() / 3600);
            println!(
                "Network:  {}",
                if registration.request.constraints.require_network {
                    "required"
                } else {
                    "not required"
                }
            );
            println!("Since:    {}", registration.registered_at);
            match (registration.last_run, registration.last_result) {
                (Some(last_run), Some(result)) => {
                    println!("Last run: {} ({})", last_run, result)
                }
                (Some(last_run), None) => println!("Last run: {}", last_run),
                _ => println!("Last run: never"),
            }
            match registration.next_run() {
                Some(next_run) => println!("Next run: after {}", next_run),
                None => println!("Next run: on next tick"),
            }
        }
        _ => {
            println!("Schedule: {}", name);
            println!("State:    unregistered");
        }
    }

    Ok(())
}
