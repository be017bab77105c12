use clap::ArgMatches;
use tracing::{error, info};

use capsync_core::session::{CredentialEntry, CredentialsFile};

use super::helpers::Context;
use crate::table::TableFormatter;

pub(crate) fn handle_accounts_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load();

    match matches.subcommand() {
        Some(("list", sub_matches)) => handle_list(&ctx, sub_matches),
        Some(("add", sub_matches)) => handle_add(&ctx, sub_matches),
        Some(("remove", sub_matches)) => handle_remove(&ctx, sub_matches),
        _ => {
            error!(event = "cli.accounts_command_unknown");
            Err("Unknown accounts command".into())
        }
    }
}

fn handle_list(ctx: &Context, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.accounts_list_started");

    let accounts = match ctx.account_store().load() {
        Ok(data) => data.accounts,
        Err(e) => {
            eprintln!("❌ Failed to load accounts: {}", e);
            error!(event = "cli.accounts_list_failed", error = %e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
    } else if accounts.is_empty() {
        println!("No accounts configured.");
    } else {
        TableFormatter::new(&accounts).print_table(&accounts);
    }

    info!(event = "cli.accounts_list_completed", count = accounts.len());
    Ok(())
}

fn handle_add(ctx: &Context, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Account name is required")?;
    let url = matches.get_one::<String>("url").ok_or("--url is required")?;
    let user = matches.get_one::<String>("user").ok_or("--user is required")?;
    let password = matches
        .get_one::<String>("password")
        .ok_or("--password or CAPSYNC_APP_PASSWORD is required")?;

    info!(event = "cli.accounts_add_started", account_name = %name);

    let account = match ctx.account_store().add_account(name) {
        Ok(account) => account,
        Err(e) => {
            eprintln!("❌ Failed to add account '{}': {}", name, e);
            error!(event = "cli.accounts_add_failed", account_name = %name, error = %e);
            return Err(e.into());
        }
    };

    // Credentials are keyed by the trimmed name the store accepted.
    let credentials_path = ctx.paths.credentials_file();
    let mut credentials = CredentialsFile::load(&credentials_path)?;
    credentials.accounts.insert(
        account.account_name.clone(),
        CredentialEntry {
            server_url: url.clone(),
            user: user.clone(),
            app_password: password.clone(),
        },
    );
    credentials.save(&credentials_path)?;

    println!("✅ Account '{}' added (id {})", account.account_name, account.id);
    info!(
        event = "cli.accounts_add_completed",
        account_id = %account.id,
        account_name = %account.account_name
    );
    Ok(())
}

fn handle_remove(ctx: &Context, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Account name is required")?;

    info!(event = "cli.accounts_remove_started", account_name = %name);

    let store = ctx.account_store();
    let Some(account) = store.find_by_name(name)? else {
        eprintln!("❌ No account named '{}'", name);
        error!(event = "cli.accounts_remove_failed", account_name = %name, reason = "not_found");
        return Err(format!("No account named '{}'", name).into());
    };

    store.remove_account(account.id)?;

    let credentials_path = ctx.paths.credentials_file();
    let mut credentials = CredentialsFile::load(&credentials_path)?;
    if credentials.accounts.remove(&account.account_name).is_some() {
        credentials.save(&credentials_path)?;
    }

    println!("Account '{}' removed.", account.account_name);
    info!(
        event = "cli.accounts_remove_completed",
        account_id = %account.id,
        account_name = %account.account_name
    );
    Ok(())
}
