//! Datacenter-wide queries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::sdk::transport::{list_or_empty, query, Transport};
use crate::service::required;
use crate::types::{ActiveJob, VirtualDatacenter};

const VIRTUAL_DATACENTER_ACTION: &str = "GetVirtualDatacenter";
const JOBS_ACTION: &str = "GetJobs";

/// Queries spanning the whole account datacenter.
#[async_trait]
pub trait DataCentersService: Send + Sync {
    /// Resources allocated in the datacenter.
    async fn virtual_datacenter(&self) -> Result<VirtualDatacenter>;

    /// Jobs currently running for the account.
    async fn jobs(&self) -> Result<Vec<ActiveJob>>;
}

/// Transport-backed [`DataCentersService`].
#[derive(Clone)]
pub struct DataCenters {
    transport: Arc<dyn Transport>,
}

impl DataCenters {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DataCentersService for DataCenters {
    async fn virtual_datacenter(&self) -> Result<VirtualDatacenter> {
        let datacenter: Option<VirtualDatacenter> =
            query(&*self.transport, VIRTUAL_DATACENTER_ACTION).await?;
        required(datacenter, || "virtual datacenter".to_string())
    }

    async fn jobs(&self) -> Result<Vec<ActiveJob>> {
        Ok(list_or_empty(query(&*self.transport, JOBS_ACTION).await?))
    }
}
