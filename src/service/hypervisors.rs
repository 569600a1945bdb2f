//! Hypervisors and their OS templates.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::sdk::transport::{list_or_empty, query, Transport};
use crate::types::{Hypervisor, HypervisorType, OsTemplate};

const LIST_ACTION: &str = "GetHypervisors";

/// Hypervisor catalogue.
#[async_trait]
pub trait HypervisorsService: Send + Sync {
    /// List hypervisors with the templates each offers.
    async fn list(&self) -> Result<Vec<Hypervisor>>;

    /// Find the template described as `description` on the first hypervisor
    /// of type `hypervisor_type`.
    async fn find_os_template(
        &self,
        hypervisor_type: HypervisorType,
        description: &str,
    ) -> Result<OsTemplate>;
}

/// Transport-backed [`HypervisorsService`].
#[derive(Clone)]
pub struct Hypervisors {
    transport: Arc<dyn Transport>,
}

impl Hypervisors {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

/// Pick a template out of an already fetched catalogue.
pub fn select_os_template(
    hypervisors: Vec<Hypervisor>,
    hypervisor_type: HypervisorType,
    description: &str,
) -> Result<OsTemplate> {
    let hypervisor = hypervisors
        .into_iter()
        .find(|h| h.hypervisor_type == hypervisor_type)
        .ok_or_else(|| Error::NotFound(format!("hypervisor {}", hypervisor_type)))?;

    hypervisor
        .templates
        .into_iter()
        .find(|t| t.description == description)
        .ok_or_else(|| {
            Error::NotFound(format!(
                "OS template '{}' on {}",
                description, hypervisor_type
            ))
        })
}

#[async_trait]
impl HypervisorsService for Hypervisors {
    async fn list(&self) -> Result<Vec<Hypervisor>> {
        Ok(list_or_empty(query(&*self.transport, LIST_ACTION).await?))
    }

    async fn find_os_template(
        &self,
        hypervisor_type: HypervisorType,
        description: &str,
    ) -> Result<OsTemplate> {
        let hypervisors = self.list().await.map_err(|e| {
            warn!("Unable to fetch hypervisors: {}", e);
            e
        })?;
        select_os_template(hypervisors, hypervisor_type, description)
    }
}
