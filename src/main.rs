// Entrypoint for the plugin.
// - Keeps `main` small: parse arguments, wire logging to stderr (stdout
//   belongs to the menu protocol), then either dispatch a single action
//   back to the API or print the status report.
// - Any failure takes the fatal path: a red ERROR marker line, the error
//   itself, exit code 1.

use anyhow::Context;
use clap::{Parser, Subcommand};
use icingabar::api::{ApiClient, Config};
use icingabar::menu;
use icingabar::model::ObjectKind;
use tracing::Level;

#[derive(Parser)]
#[command(name = "icingabar")]
#[command(about = "Icinga2 status-bar menu plugin")]
struct Args {
    /// Log level for stderr diagnostics
    #[arg(short, long, default_value = "warn", value_parser = clap::value_parser!(Level))]
    log_level: Level,

    #[command(subcommand)]
    action: Option<ActionCommand>,
}

/// Actions the rendered menu re-invokes us with. Command names match the
/// verbs embedded in the menu lines verbatim.
#[derive(Subcommand)]
enum ActionCommand {
    /// Acknowledge a problem without resolving it
    Ack { kind: ObjectKind, name: String },

    /// Withdraw a previous acknowledgement
    #[command(name = "remove_ack")]
    RemoveAck { kind: ObjectKind, name: String },

    /// Ask the server to re-run the check immediately
    Recheck { kind: ObjectKind, name: String },
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args) {
        // Fatal path: marker line plus the error detail, nothing else.
        println!("ERROR | color=red");
        println!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let client = ApiClient::new(Config::default())?;

    // An action invocation performs its one API call and exits; the
    // host application refreshes the menu afterwards and observes the
    // new state on its next fetch.
    if let Some(action) = args.action {
        match action {
            ActionCommand::Ack { kind, name } => client.acknowledge(kind, &name)?,
            ActionCommand::RemoveAck { kind, name } => client.remove_acknowledgement(kind, &name)?,
            ActionCommand::Recheck { kind, name } => client.reschedule_check(kind, &name)?,
        }
        return Ok(());
    }

    let hosts = client.fetch_hosts()?;
    let services = client.fetch_services()?;
    let program = std::env::current_exe().context("cannot resolve own executable path")?;

    for line in menu::render(&hosts, &services, &program) {
        println!("{line}");
    }
    Ok(())
}
