//! Cloud server service: listing, details, creation and deletion.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::sdk::transport::{call, call_unit, list_or_empty, query, wrapped, Transport};
use crate::sdk::types::ServerIdRequest;
use crate::sdk::wait::{
    wait_for_server_named, wait_for_server_status, ServerListing, ServerStateSource, WaitSpec,
};
use crate::service::{require_id, required};
use crate::service::server_actions::enqueue_power_off;
use crate::types::{CloudServer, CloudServerCreateRequest, CloudServerDetails, ServerStatus};

const LIST_ACTION: &str = "GetServers";
const DETAILS_ACTION: &str = "GetServerDetails";
const CREATE_ACTION: &str = "SetEnqueueServerCreation";
const DELETE_ACTION: &str = "SetEnqueueServerDeletion";

/// Most virtual disks a Pro server can carry.
pub const MAX_VIRTUAL_DISKS: usize = 4;

/// Largest virtual disk, in GB.
pub const MAX_DISK_SIZE_GB: i64 = 500;

/// Cloud server operations.
#[async_trait]
pub trait CloudServersService: Send + Sync {
    /// List all cloud servers of the account.
    async fn list(&self) -> Result<Vec<CloudServer>>;

    /// Get the details of one server.
    async fn get(&self, server_id: i64) -> Result<CloudServerDetails>;

    /// Enqueue the creation of a server.
    ///
    /// The API does not return the new server's id; use
    /// [`create_and_wait`](Self::create_and_wait) to obtain it.
    async fn create(&self, request: &CloudServerCreateRequest) -> Result<()>;

    /// Enqueue the creation of a server and wait for it to be listed.
    async fn create_and_wait(&self, request: &CloudServerCreateRequest) -> Result<CloudServer>;

    /// Power the server off if needed, wait for it to be off, then enqueue its deletion.
    async fn delete(&self, server_id: i64) -> Result<()>;
}

/// Transport-backed [`CloudServersService`].
#[derive(Clone)]
pub struct CloudServers {
    transport: Arc<dyn Transport>,
    wait: WaitSpec,
}

impl CloudServers {
    /// Create a new cloud server service.
    pub fn new(transport: Arc<dyn Transport>, wait: WaitSpec) -> Self {
        Self { transport, wait }
    }
}

pub(crate) async fn fetch_server_details(
    transport: &dyn Transport,
    server_id: i64,
) -> Result<CloudServerDetails> {
    require_id("ServerId", server_id)?;
    let details: Option<CloudServerDetails> =
        call(transport, DETAILS_ACTION, &ServerIdRequest::new(server_id)).await?;
    required(details, || format!("server {}", server_id))
}

pub(crate) async fn fetch_servers(transport: &dyn Transport) -> Result<Vec<CloudServer>> {
    Ok(list_or_empty(query(transport, LIST_ACTION).await?))
}

/// Check a creation request before anything is sent.
pub fn validate_create_request(request: &CloudServerCreateRequest) -> Result<()> {
    if request.name().trim().is_empty() {
        return Err(Error::argument("Name", "cannot be empty"));
    }

    match request {
        CloudServerCreateRequest::Pro(pro) => {
            if pro.administrator_password.is_empty() {
                return Err(Error::argument("AdministratorPassword", "cannot be empty"));
            }
            if pro.cpu_quantity < 1 {
                return Err(Error::argument("CPUQuantity", "must be at least 1"));
            }
            if pro.ram_quantity < 1 {
                return Err(Error::argument("RAMQuantity", "must be at least 1"));
            }
            if pro.virtual_disks.is_empty() || pro.virtual_disks.len() > MAX_VIRTUAL_DISKS {
                return Err(Error::argument(
                    "VirtualDisks",
                    format!(
                        "between 1 and {} disks are required, got {}",
                        MAX_VIRTUAL_DISKS,
                        pro.virtual_disks.len()
                    ),
                ));
            }
            if let Some(disk) = pro
                .virtual_disks
                .iter()
                .find(|d| d.size < 1 || d.size > MAX_DISK_SIZE_GB)
            {
                return Err(Error::argument(
                    "VirtualDisks.Size",
                    format!(
                        "must be between 1 and {} GB, got {}",
                        MAX_DISK_SIZE_GB, disk.size
                    ),
                ));
            }
        }
        CloudServerCreateRequest::Smart(smart) => {
            if smart.administrator_password.is_empty() {
                return Err(Error::argument("AdministratorPassword", "cannot be empty"));
            }
        }
    }

    Ok(())
}

#[async_trait]
impl ServerStateSource for CloudServers {
    async fn server_details(&self, server_id: i64) -> Result<CloudServerDetails> {
        fetch_server_details(&*self.transport, server_id).await
    }
}

#[async_trait]
impl ServerListing for CloudServers {
    async fn list_servers(&self) -> Result<Vec<CloudServer>> {
        fetch_servers(&*self.transport).await
    }
}

#[async_trait]
impl CloudServersService for CloudServers {
    async fn list(&self) -> Result<Vec<CloudServer>> {
        fetch_servers(&*self.transport).await
    }

    async fn get(&self, server_id: i64) -> Result<CloudServerDetails> {
        fetch_server_details(&*self.transport, server_id).await
    }

    async fn create(&self, request: &CloudServerCreateRequest) -> Result<()> {
        validate_create_request(request)?;
        let body = wrapped("Server", request)?;
        call_unit(&*self.transport, CREATE_ACTION, &body).await?;
        info!(name = request.name(), "Server creation enqueued");
        Ok(())
    }

    async fn create_and_wait(&self, request: &CloudServerCreateRequest) -> Result<CloudServer> {
        self.create(request).await?;
        let server = wait_for_server_named(self, request.name(), &self.wait).await?;
        info!(name = request.name(), server_id = server.server_id, "Server listed");
        Ok(server)
    }

    async fn delete(&self, server_id: i64) -> Result<()> {
        let details = self.server_details(server_id).await?;

        if details.server_status == ServerStatus::On {
            debug!(server_id, "Powering off before deletion");
            enqueue_power_off(&*self.transport, server_id).await?;
        }

        wait_for_server_status(self, server_id, ServerStatus::Off, &self.wait).await?;

        call_unit(&*self.transport, DELETE_ACTION, &ServerIdRequest::new(server_id)).await?;
        info!(server_id, "Server deletion enqueued");
        Ok(())
    }
}
