//! Aruba Cloud CLI.
//!
//! Thin command-line front end over the client library. Results are printed
//! as pretty JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use arubacloud_rs::config::{Args, Command, Config};
use arubacloud_rs::service::{
    CloudServerActionsService, CloudServersService, DataCentersService, HypervisorsService,
    PurchasedIpsService, VlansService,
};
use arubacloud_rs::{Client, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let command = args.command.clone();
    let config: Config = args.into();

    // Initialize logging
    let filter = EnvFilter::try_new(config.filter_directive())
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Aruba Cloud CLI v{}", VERSION);
    // Serialized form leaves the password out
    debug!(config = %serde_json::to_value(&config).unwrap_or_default(), "Loaded configuration");

    let client = Client::create(config.client_options())
        .await
        .context("failed to create Aruba Cloud client")?;

    run(&client, command).await?;

    if let Some(metrics) = client.metrics() {
        if config.print_metrics {
            eprint!("{}", metrics.to_prometheus());
        } else {
            let s = metrics.snapshot();
            debug!(
                requests = s.requests_total,
                failed = s.requests_failed,
                remote_errors = s.remote_errors,
                "Request metrics"
            );
        }
    }

    Ok(())
}

async fn run(client: &Client, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Servers => print(&client.cloud_servers().list().await?),
        Command::Server { id } => print(&client.cloud_servers().get(id).await?),
        Command::PowerOn { id } => {
            client.server_actions().power_on(id).await?;
            print(&enqueued(id, "power-on"))
        }
        Command::PowerOff { id } => {
            client.server_actions().power_off(id).await?;
            print(&enqueued(id, "power-off"))
        }
        Command::PowerCycle { id } => {
            client.server_actions().power_cycle(id).await?;
            print(&enqueued(id, "power-cycle"))
        }
        Command::Delete { id } => {
            client.cloud_servers().delete(id).await?;
            print(&enqueued(id, "delete"))
        }
        Command::Jobs => print(&client.datacenters().jobs().await?),
        Command::Datacenter => print(&client.datacenters().virtual_datacenter().await?),
        Command::Hypervisors => print(&client.hypervisors().list().await?),
        Command::Ips => print(&client.purchased_ips().list().await?),
        Command::Vlans => print(&client.vlans().list().await?),
    }
}

fn enqueued(server_id: i64, action: &str) -> serde_json::Value {
    json!({"ServerId": server_id, "Action": action, "Status": "enqueued"})
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
