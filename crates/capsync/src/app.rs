use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("capsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Periodically refresh server capabilities for remote accounts")
        .long_about("capsync keeps a local cache of each account's server capabilities (brand color, notes API version, direct editing support) and display name up to date. Register the schedule once, then let a system timer call 'capsync tick'; the refresh runs at most once per interval and only with a network connection.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tick")
                .about("Run a scheduled refresh if the schedule is enabled and due")
                .long_about(
                    "Entry point for system timers (cron, systemd, launchd).\n\n\
                    Does nothing unless the schedule is enabled, a full interval has passed since\n\
                    the last run, and the network is reachable. Exits non-zero when the tick fails."
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .short('f')
                        .help("Run even if not due or the network check fails")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output the tick report in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("refresh")
                .about("Refresh all accounts now, ignoring the schedule")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output the tick report in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("schedule")
                .about("Manage the periodic refresh schedule")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("enable")
                        .about("Register the periodic refresh, replacing any existing registration")
                )
                .subcommand(
                    Command::new("disable")
                        .about("Remove the periodic refresh registration")
                )
                .subcommand(
                    Command::new("status")
                        .about("Show the schedule registration and last run")
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output in JSON format")
                                .action(ArgAction::SetTrue)
                        )
                )
        )
        .subcommand(
            Command::new("accounts")
                .about("Manage remote accounts")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("list")
                        .about("List accounts and their cached capabilities")
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output in JSON format")
                                .action(ArgAction::SetTrue)
                        )
                )
                .subcommand(
                    Command::new("add")
                        .about("Add an account and store its credentials")
                        .arg(
                            Arg::new("name")
                                .help("Account name, e.g. alice@cloud.example.com")
                                .required(true)
                                .index(1)
                        )
                        .arg(
                            Arg::new("url")
                                .long("url")
                                .help("Server base URL")
                                .required(true)
                        )
                        .arg(
                            Arg::new("user")
                                .long("user")
                                .help("Login user id")
                                .required(true)
                        )
                        .arg(
                            Arg::new("password")
                                .long("password")
                                .help("App password (defaults to $CAPSYNC_APP_PASSWORD)")
                                .env("CAPSYNC_APP_PASSWORD")
                                .hide_env_values(true)
                                .required(true)
                        )
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove an account and its stored credentials")
                        .arg(
                            Arg::new("name")
                                .help("Account name")
                                .required(true)
                                .index(1)
                        )
                )
        )
}
