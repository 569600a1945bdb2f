//! Server snapshots.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::sdk::transport::{call_unit, wrapped, Transport};
use crate::sdk::types::SnapshotRequest;
use crate::service::require_id;

const SNAPSHOT_ACTION: &str = "SetEnqueueServerSnapshot";

/// Operation carried in `SnapshotOperationTypes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOperation {
    Create,
    Restore,
    Delete,
}

impl SnapshotOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotOperation::Create => "Create",
            SnapshotOperation::Restore => "Restore",
            SnapshotOperation::Delete => "Delete",
        }
    }
}

/// Snapshot management. A server holds at most one snapshot.
#[async_trait]
pub trait SnapshotsService: Send + Sync {
    async fn create(&self, server_id: i64) -> Result<()>;
    async fn restore(&self, server_id: i64) -> Result<()>;
    async fn delete(&self, server_id: i64) -> Result<()>;
}

/// Transport-backed [`SnapshotsService`].
#[derive(Clone)]
pub struct Snapshots {
    transport: Arc<dyn Transport>,
}

impl Snapshots {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn enqueue(&self, server_id: i64, operation: SnapshotOperation) -> Result<()> {
        require_id("ServerId", server_id)?;
        let request = SnapshotRequest {
            server_id,
            snapshot_operation_types: operation.as_str().to_string(),
        };
        call_unit(&*self.transport, SNAPSHOT_ACTION, &wrapped("Snapshot", &request)?).await?;
        info!(server_id, operation = operation.as_str(), "Snapshot operation enqueued");
        Ok(())
    }
}

#[async_trait]
impl SnapshotsService for Snapshots {
    async fn create(&self, server_id: i64) -> Result<()> {
        self.enqueue(server_id, SnapshotOperation::Create).await
    }

    async fn restore(&self, server_id: i64) -> Result<()> {
        self.enqueue(server_id, SnapshotOperation::Restore).await
    }

    async fn delete(&self, server_id: i64) -> Result<()> {
        self.enqueue(server_id, SnapshotOperation::Delete).await
    }
}
