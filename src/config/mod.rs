//! Configuration management for the Aruba Cloud CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::sdk::credentials::API_SERVER_ENV;
use crate::sdk::types::ClientOptions;
use crate::sdk::wait::{WaitSpec, DEFAULT_MAX_FAILURES, DEFAULT_POLL_INTERVAL};
use crate::types::DataCenterRegion;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "ARUBACLOUD_LOG";

/// Command-line arguments for the Aruba Cloud CLI.
#[derive(Parser, Debug, Clone)]
#[command(name = "arubacloud")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage Aruba Cloud servers and network resources")]
pub struct Args {
    /// Datacenter: code (1-6), dcN, or name (e.g. "france")
    #[arg(short = 'D', long, default_value = "1", env = "ARUBACLOUD_DATACENTER")]
    pub datacenter: DataCenterRegion,

    /// Control panel username (overrides env/credentials file)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Control panel password (overrides env/credentials file)
    #[arg(short, long)]
    pub password: Option<String>,

    /// API host override, e.g. https://api.dc1.computing.cloud.it
    #[arg(long, env = API_SERVER_ENV)]
    pub api_server: Option<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info", env = LOG_LEVEL_ENV)]
    pub log_level: String,

    /// Enable debug logging (same as --log-level debug)
    #[arg(short, long)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Seconds between two polls while waiting on a server
    #[arg(long, default_value = "10")]
    pub poll_interval: u64,

    /// Transient API failures tolerated per wait
    #[arg(long, default_value = "4")]
    pub max_failures: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "300")]
    pub timeout: u64,

    /// Give up waiting on a server after this many seconds
    #[arg(long)]
    pub wait_timeout: Option<u64>,

    /// Print request metrics in Prometheus format to stderr on exit
    #[arg(long)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List cloud servers
    Servers,
    /// Show the details of a server
    Server { id: i64 },
    /// Power a server on
    PowerOn { id: i64 },
    /// Power a server off
    PowerOff { id: i64 },
    /// Power a server off, wait until it is off, and power it back on
    PowerCycle { id: i64 },
    /// Power a server off if needed and delete it
    Delete { id: i64 },
    /// List running jobs
    Jobs,
    /// Show the resources of the virtual datacenter
    Datacenter,
    /// List hypervisors and their OS templates
    Hypervisors,
    /// List purchased IP addresses
    Ips,
    /// List purchased VLANs
    Vlans,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Datacenter region
    pub datacenter: DataCenterRegion,
    /// Username
    pub username: Option<String>,
    /// Password
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// API host override
    pub api_server: Option<String>,
    /// Log level
    pub log_level: String,
    /// Debug mode
    pub debug: bool,
    /// JSON log output
    #[serde(default)]
    pub log_json: bool,
    /// Poll interval in seconds
    pub poll_interval_secs: u64,
    /// Transient failures tolerated per wait
    pub max_failures: u32,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Wait deadline in seconds
    pub wait_timeout_secs: Option<u64>,
    /// Print metrics on exit
    #[serde(default)]
    pub print_metrics: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            datacenter: args.datacenter,
            username: args.username,
            password: args.password,
            api_server: args.api_server,
            log_level: args.log_level,
            debug: args.debug,
            log_json: args.log_json,
            poll_interval_secs: args.poll_interval,
            max_failures: args.max_failures,
            timeout_secs: args.timeout,
            wait_timeout_secs: args.wait_timeout,
            print_metrics: args.print_metrics,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datacenter: DataCenterRegion::default(),
            username: None,
            password: None,
            api_server: None,
            log_level: "info".to_string(),
            debug: false,
            log_json: false,
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_failures: DEFAULT_MAX_FAILURES,
            timeout_secs: 300,
            wait_timeout_secs: None,
            print_metrics: false,
        }
    }
}

impl Config {
    /// Tracing filter directive; `debug` wins over the configured level.
    pub fn filter_directive(&self) -> String {
        if self.debug {
            "debug".to_string()
        } else {
            self.log_level.to_lowercase()
        }
    }

    /// Polling parameters for waiting operations.
    pub fn wait_spec(&self) -> WaitSpec {
        let spec = WaitSpec::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_max_failures(self.max_failures);
        match self.wait_timeout_secs {
            Some(secs) => spec.with_deadline(Duration::from_secs(secs)),
            None => spec,
        }
    }

    /// Options for [`Client::create`](crate::client::Client::create).
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            username: self.username.clone(),
            password: self.password.clone(),
            datacenter: self.datacenter,
            api_server: self.api_server.clone(),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            wait: self.wait_spec(),
        }
    }
}
