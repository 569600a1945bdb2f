//! Private VLANs and their attachment to server network adapters.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::{Error, Result};
use crate::sdk::transport::{call, call_unit, list_or_empty, query, wrapped, Transport};
use crate::sdk::types::{VlanPurchaseRequest, VlanRemoveRequest, VlanRequest};
use crate::service::{require_id, required};
use crate::types::{PrivateIp, PurchasedVlan, VlanAttachRequest};

const LIST_ACTION: &str = "GetPurchasedVLans";
const PURCHASE_ACTION: &str = "SetPurchaseVLan";
const REMOVE_ACTION: &str = "SetRemoveVLan";
const ATTACH_ACTION: &str = "SetEnqueueAssociateVLan";
const DETACH_ACTION: &str = "SetEnqueueDeassociateVLan";
const REQUEST_KEY: &str = "VLanRequest";

/// Purchased VLANs.
#[async_trait]
pub trait VlansService: Send + Sync {
    async fn list(&self) -> Result<Vec<PurchasedVlan>>;

    /// Buy a VLAN called `name`.
    async fn purchase(&self, name: &str) -> Result<PurchasedVlan>;

    /// Release a VLAN.
    async fn remove(&self, vlan_resource_id: i64) -> Result<()>;

    /// Enqueue the association of a VLAN with a network adapter.
    ///
    /// With a gateway, the private address is also configured on the guest.
    async fn attach(&self, request: &VlanAttachRequest) -> Result<()>;

    /// Enqueue the removal of a VLAN from a network adapter.
    async fn detach(&self, request: &VlanAttachRequest) -> Result<()>;
}

/// Transport-backed [`VlansService`].
#[derive(Clone)]
pub struct Vlans {
    transport: Arc<dyn Transport>,
}

impl Vlans {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Build the association payload for `request`.
pub fn attach_payload(request: &VlanAttachRequest) -> Result<VlanRequest> {
    require_id("NetworkAdapterId", request.network_adapter_id)?;
    require_id("VLanResourceId", request.vlan_resource_id)?;

    let private_ip = match non_empty(&request.gateway) {
        Some(gateway) => {
            let ip = non_empty(&request.ip)
                .ok_or_else(|| Error::argument("IP", "required when a gateway is set"))?;
            let subnet_mask = non_empty(&request.subnet_mask)
                .ok_or_else(|| Error::argument("SubnetMask", "required when a gateway is set"))?;
            Some(PrivateIp {
                gateway: gateway.to_string(),
                ip: ip.to_string(),
                subnet_mask: subnet_mask.to_string(),
            })
        }
        None => None,
    };

    Ok(VlanRequest {
        network_adapter_id: request.network_adapter_id,
        vlan_resource_id: request.vlan_resource_id,
        set_on_virtual_machine: private_ip.is_some(),
        private_ips: Some(private_ip.into_iter().collect()),
    })
}

/// Build the dissociation payload for `request`. Never carries private IPs.
pub fn detach_payload(request: &VlanAttachRequest) -> Result<VlanRequest> {
    require_id("NetworkAdapterId", request.network_adapter_id)?;
    require_id("VLanResourceId", request.vlan_resource_id)?;

    Ok(VlanRequest {
        network_adapter_id: request.network_adapter_id,
        vlan_resource_id: request.vlan_resource_id,
        set_on_virtual_machine: false,
        private_ips: None,
    })
}

#[async_trait]
impl VlansService for Vlans {
    async fn list(&self) -> Result<Vec<PurchasedVlan>> {
        Ok(list_or_empty(query(&*self.transport, LIST_ACTION).await?))
    }

    async fn purchase(&self, name: &str) -> Result<PurchasedVlan> {
        if name.trim().is_empty() {
            return Err(Error::argument("VLanName", "cannot be empty"));
        }
        let vlan: Option<PurchasedVlan> = call(
            &*self.transport,
            PURCHASE_ACTION,
            &VlanPurchaseRequest {
                vlan_name: name.to_string(),
            },
        )
        .await?;
        let vlan = required(vlan, || format!("purchased VLAN {}", name))?;
        info!(name, resource_id = vlan.resource_id, "VLAN purchased");
        Ok(vlan)
    }

    async fn remove(&self, vlan_resource_id: i64) -> Result<()> {
        require_id("VLanResourceId", vlan_resource_id)?;
        call_unit(
            &*self.transport,
            REMOVE_ACTION,
            &VlanRemoveRequest { vlan_resource_id },
        )
        .await?;
        info!(resource_id = vlan_resource_id, "VLAN removed");
        Ok(())
    }

    async fn attach(&self, request: &VlanAttachRequest) -> Result<()> {
        let body = wrapped(REQUEST_KEY, &attach_payload(request)?)?;
        call_unit(&*self.transport, ATTACH_ACTION, &body).await?;
        info!(
            adapter = request.network_adapter_id,
            vlan = request.vlan_resource_id,
            "VLAN association enqueued"
        );
        Ok(())
    }

    async fn detach(&self, request: &VlanAttachRequest) -> Result<()> {
        let body = wrapped(REQUEST_KEY, &detach_payload(request)?)?;
        call_unit(&*self.transport, DETACH_ACTION, &body).await?;
        info!(
            adapter = request.network_adapter_id,
            vlan = request.vlan_resource_id,
            "VLAN dissociation enqueued"
        );
        Ok(())
    }
}
