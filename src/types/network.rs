//! Network types: adapters, IP addresses and VLANs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::null_default;

/// Network interface of a cloud server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkAdapter {
    pub id: i64,
    pub network_adapter_type: i64,
    #[serde(rename = "IPAddresses", deserialize_with = "null_default")]
    pub ip_addresses: Vec<IpAddress>,
    #[serde(deserialize_with = "null_default")]
    pub public_ip_addresses: Vec<PublicIpAddress>,
    pub mac_address: Option<String>,
    pub server_id: i64,
    #[serde(rename = "VLan")]
    pub vlan: Option<PurchasedVlan>,
}

/// IP address bound to an adapter, with its IPv4/IPv6 addressing plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IpAddress {
    pub value: String,
    pub gateway: Option<String>,
    pub sub_net_mask: Option<String>,
    #[serde(rename = "GatewayIPv6")]
    pub gateway_ipv6: Option<String>,
    #[serde(rename = "PrefixIPv6")]
    pub prefix_ipv6: Option<i64>,
    #[serde(rename = "SubnetPrefixIPv6")]
    pub subnet_prefix_ipv6: Option<String>,
    #[serde(rename = "StartRangeIPv6")]
    pub start_range_ipv6: Option<String>,
    #[serde(rename = "EndRangeIPv6")]
    pub end_range_ipv6: Option<String>,
    pub server_id: Option<i64>,
    pub company_id: i64,
    pub product_id: i64,
    pub resource_id: i64,
    pub resource_type: i64,
    pub user_id: i64,
    #[serde(rename = "LoadBalancerID")]
    pub load_balancer_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PublicIpAddress {
    #[serde(rename = "PrimaryIPAddress")]
    pub primary_ip_address: Option<String>,
    pub public_ip_address_resource_id: Option<String>,
}

/// Public IP purchased by the account. Same shape as [`IpAddress`].
pub type PurchasedIp = IpAddress;

/// VLAN purchased by the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PurchasedVlan {
    pub name: String,
    pub vlan_code: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub server_ids: Vec<i64>,
    pub resource_id: i64,
    pub resource_type: i64,
    pub product_id: i64,
    pub company_id: i64,
    pub user_id: i64,
}

/// Attach or detach a VLAN on a server network adapter.
///
/// When `gateway` is set on attach, the address triple is configured
/// on the guest as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VlanAttachRequest {
    pub network_adapter_id: i64,
    pub vlan_resource_id: i64,
    pub gateway: Option<String>,
    pub ip: Option<String>,
    pub subnet_mask: Option<String>,
}

/// Private address configured on the guest when a VLAN is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateIp {
    #[serde(rename = "GateWay")]
    pub gateway: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "SubNetMask")]
    pub subnet_mask: String,
}
