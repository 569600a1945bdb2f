//! Client - entry point holding one handle per resource family.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::Result;
use crate::metrics::Metrics;
use crate::sdk::api_client::ApiClient;
use crate::sdk::credentials::{resolve_api_host, resolve_credentials};
use crate::sdk::transport::Transport;
use crate::sdk::types::ClientOptions;
use crate::sdk::wait::WaitSpec;
use crate::service::{
    CloudServerActions, CloudServers, DataCenters, Hypervisors, PurchasedIps, ScheduledTasks,
    Snapshots, Vlans,
};

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Aruba Cloud API client.
#[derive(Clone)]
pub struct Client {
    cloud_servers: CloudServers,
    server_actions: CloudServerActions,
    datacenters: DataCenters,
    hypervisors: Hypervisors,
    purchased_ips: PurchasedIps,
    vlans: Vlans,
    snapshots: Snapshots,
    scheduled_tasks: ScheduledTasks,
    metrics: Option<Arc<Metrics>>,
}

impl Client {
    /// Create a client talking to the Aruba Cloud API.
    ///
    /// Credentials come from the options, then the environment, then the
    /// credentials file.
    pub async fn create(options: ClientOptions) -> Result<Self> {
        let credentials =
            resolve_credentials(options.username.as_deref(), options.password.as_deref()).await?;
        let api_host = resolve_api_host(options.datacenter, options.api_server.as_deref());

        let api_client = ApiClient::new(
            &api_host,
            credentials.username,
            credentials.password,
            options.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        )?;
        info!(datacenter = %options.datacenter, base_url = api_client.base_url(), "Client ready");

        let metrics = api_client.metrics();
        let mut client = Self::with_transport(Arc::new(api_client), options.wait);
        client.metrics = Some(metrics);
        Ok(client)
    }

    /// Create a client on top of any transport.
    pub fn with_transport(transport: Arc<dyn Transport>, wait: WaitSpec) -> Self {
        Self {
            cloud_servers: CloudServers::new(transport.clone(), wait.clone()),
            server_actions: CloudServerActions::new(transport.clone(), wait),
            datacenters: DataCenters::new(transport.clone()),
            hypervisors: Hypervisors::new(transport.clone()),
            purchased_ips: PurchasedIps::new(transport.clone()),
            vlans: Vlans::new(transport.clone()),
            snapshots: Snapshots::new(transport.clone()),
            scheduled_tasks: ScheduledTasks::new(transport),
            metrics: None,
        }
    }

    pub fn cloud_servers(&self) -> &CloudServers {
        &self.cloud_servers
    }

    pub fn server_actions(&self) -> &CloudServerActions {
        &self.server_actions
    }

    pub fn datacenters(&self) -> &DataCenters {
        &self.datacenters
    }

    pub fn hypervisors(&self) -> &Hypervisors {
        &self.hypervisors
    }

    pub fn purchased_ips(&self) -> &PurchasedIps {
        &self.purchased_ips
    }

    pub fn vlans(&self) -> &Vlans {
        &self.vlans
    }

    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    pub fn scheduled_tasks(&self) -> &ScheduledTasks {
        &self.scheduled_tasks
    }

    /// Request metrics, when the client talks HTTP.
    pub fn metrics(&self) -> Option<Arc<Metrics>> {
        self.metrics.clone()
    }
}
