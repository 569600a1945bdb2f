//! Public IP addresses purchased by the account.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::sdk::transport::{call_unit, list_or_empty, query, Transport};
use crate::sdk::types::IpRemoveRequest;
use crate::service::{require_id, required};
use crate::types::PurchasedIp;

const LIST_ACTION: &str = "GetPurchasedIpAddresses";
const PURCHASE_ACTION: &str = "SetPurchaseIpAddress";
const REMOVE_ACTION: &str = "SetRemoveIpAddress";

/// Purchased public IP addresses.
#[async_trait]
pub trait PurchasedIpsService: Send + Sync {
    async fn list(&self) -> Result<Vec<PurchasedIp>>;

    /// Buy a new public IP address.
    async fn purchase(&self) -> Result<PurchasedIp>;

    /// Release the address with resource id `ip_address_resource_id`.
    async fn remove(&self, ip_address_resource_id: i64) -> Result<()>;
}

/// Transport-backed [`PurchasedIpsService`].
#[derive(Clone)]
pub struct PurchasedIps {
    transport: Arc<dyn Transport>,
}

impl PurchasedIps {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl PurchasedIpsService for PurchasedIps {
    async fn list(&self) -> Result<Vec<PurchasedIp>> {
        Ok(list_or_empty(query(&*self.transport, LIST_ACTION).await?))
    }

    async fn purchase(&self) -> Result<PurchasedIp> {
        let ip: Option<PurchasedIp> = query(&*self.transport, PURCHASE_ACTION).await?;
        let ip = required(ip, || "purchased IP address".to_string())?;
        info!(ip = %ip.value, resource_id = ip.resource_id, "IP address purchased");
        Ok(ip)
    }

    async fn remove(&self, ip_address_resource_id: i64) -> Result<()> {
        require_id("IpAddressResourceId", ip_address_resource_id)?;
        call_unit(
            &*self.transport,
            REMOVE_ACTION,
            &IpRemoveRequest {
                ip_address_resource_id,
            },
        )
        .await?;
        info!(resource_id = ip_address_resource_id, "IP address removed");
        Ok(())
    }
}
