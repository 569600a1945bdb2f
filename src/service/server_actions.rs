//! Power, archive and reinstall actions on existing cloud servers.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::sdk::transport::{call_unit, wrapped, Transport};
use crate::sdk::types::ServerIdRequest;
use crate::sdk::wait::{wait_for_server_status, ServerStateSource, WaitSpec};
use crate::service::cloud_servers::fetch_server_details;
use crate::service::require_id;
use crate::types::{CloudServerDetails, ServerReinitializeRequest, ServerStatus};

const POWER_OFF_ACTION: &str = "SetEnqueueServerPowerOff";
const POWER_ON_ACTION: &str = "SetEnqueueServerStart";
const ARCHIVE_ACTION: &str = "ArchiveVirtualServer";
const RESTORE_ACTION: &str = "SetEnqueueServerRestore";
const REINITIALIZE_ACTION: &str = "SetEnqueueReinitializeServer";

/// Actions on an existing cloud server.
#[async_trait]
pub trait CloudServerActionsService: Send + Sync {
    /// Enqueue a power-off.
    async fn power_off(&self, server_id: i64) -> Result<()>;

    /// Enqueue a power-on.
    async fn power_on(&self, server_id: i64) -> Result<()>;

    /// Power the server off, wait until it is off, and power it back on.
    ///
    /// A server that is already off is powered on first.
    async fn power_cycle(&self, server_id: i64) -> Result<()>;

    /// Archive the server, releasing its compute resources.
    async fn archive(&self, server_id: i64) -> Result<()>;

    /// Restore an archived server with the given CPU and RAM quantities.
    async fn restore(&self, server_id: i64, cpu_quantity: i64, ram_quantity: i64) -> Result<()>;

    /// Power the server off if needed, wait until it is off, then reinstall it.
    async fn reinitialize(&self, request: &ServerReinitializeRequest) -> Result<()>;
}

/// Transport-backed [`CloudServerActionsService`].
#[derive(Clone)]
pub struct CloudServerActions {
    transport: Arc<dyn Transport>,
    wait: WaitSpec,
}

impl CloudServerActions {
    /// Create a new server actions service.
    pub fn new(transport: Arc<dyn Transport>, wait: WaitSpec) -> Self {
        Self { transport, wait }
    }
}

pub(crate) async fn enqueue_power_off(transport: &dyn Transport, server_id: i64) -> Result<()> {
    require_id("ServerId", server_id)?;
    call_unit(transport, POWER_OFF_ACTION, &ServerIdRequest::new(server_id)).await?;
    debug!(server_id, "Power-off enqueued");
    Ok(())
}

pub(crate) async fn enqueue_power_on(transport: &dyn Transport, server_id: i64) -> Result<()> {
    require_id("ServerId", server_id)?;
    call_unit(transport, POWER_ON_ACTION, &ServerIdRequest::new(server_id)).await?;
    debug!(server_id, "Power-on enqueued");
    Ok(())
}

#[async_trait]
impl ServerStateSource for CloudServerActions {
    async fn server_details(&self, server_id: i64) -> Result<CloudServerDetails> {
        fetch_server_details(&*self.transport, server_id).await
    }
}

#[async_trait]
impl CloudServerActionsService for CloudServerActions {
    async fn power_off(&self, server_id: i64) -> Result<()> {
        enqueue_power_off(&*self.transport, server_id).await
    }

    async fn power_on(&self, server_id: i64) -> Result<()> {
        enqueue_power_on(&*self.transport, server_id).await
    }

    async fn power_cycle(&self, server_id: i64) -> Result<()> {
        let details = self.server_details(server_id).await?;

        if details.server_status == ServerStatus::Off {
            enqueue_power_on(&*self.transport, server_id).await?;
        }

        enqueue_power_off(&*self.transport, server_id).await?;
        wait_for_server_status(self, server_id, ServerStatus::Off, &self.wait).await?;
        enqueue_power_on(&*self.transport, server_id).await?;

        info!(server_id, "Server power-cycled");
        Ok(())
    }

    async fn archive(&self, server_id: i64) -> Result<()> {
        require_id("ServerId", server_id)?;
        let body = wrapped(ARCHIVE_ACTION, &ServerIdRequest::new(server_id))?;
        call_unit(&*self.transport, ARCHIVE_ACTION, &body).await?;
        info!(server_id, "Server archive enqueued");
        Ok(())
    }

    async fn restore(&self, server_id: i64, cpu_quantity: i64, ram_quantity: i64) -> Result<()> {
        require_id("ServerId", server_id)?;
        require_id("CPUQuantity", cpu_quantity)?;
        require_id("RAMQuantity", ram_quantity)?;

        let request = ServerIdRequest {
            server_id,
            cpu_quantity: Some(cpu_quantity),
            ram_quantity: Some(ram_quantity),
        };
        let body = wrapped(RESTORE_ACTION, &request)?;
        call_unit(&*self.transport, RESTORE_ACTION, &body).await?;
        info!(server_id, cpu_quantity, ram_quantity, "Server restore enqueued");
        Ok(())
    }

    async fn reinitialize(&self, request: &ServerReinitializeRequest) -> Result<()> {
        let server_id = request.server_id;
        let details = self.server_details(server_id).await?;

        if details.server_status == ServerStatus::On {
            debug!(server_id, "Powering off before reinitialize");
            enqueue_power_off(&*self.transport, server_id).await?;
        }

        wait_for_server_status(self, server_id, ServerStatus::Off, &self.wait).await?;

        call_unit(&*self.transport, REINITIALIZE_ACTION, request).await?;
        info!(server_id, "Server reinitialize enqueued");
        Ok(())
    }
}
