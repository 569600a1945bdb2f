//! SDK-specific types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::sdk::wait::WaitSpec;
use crate::types::{DataCenterRegion, PrivateIp};

/// Options for creating a [`Client`](crate::client::Client).
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Control panel username (overrides env/credentials file)
    pub username: Option<String>,
    /// Control panel password (overrides env/credentials file)
    pub password: Option<String>,
    /// Region whose API host is used by default
    pub datacenter: DataCenterRegion,
    /// API host override, e.g. `https://api.dc1.computing.cloud.it`
    pub api_server: Option<String>,
    /// HTTP request timeout (default: 300s)
    pub timeout: Option<Duration>,
    /// Polling parameters for operations that wait on server state
    pub wait: WaitSpec,
}

/// Response envelope shared by every API action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Envelope {
    pub success: bool,
    pub result_code: i64,
    pub result_message: Option<String>,
    pub value: Value,
}

// ===== API Request Types =====

/// Body for actions addressing a single server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerIdRequest {
    pub server_id: i64,
    #[serde(rename = "CPUQuantity", skip_serializing_if = "Option::is_none")]
    pub cpu_quantity: Option<i64>,
    #[serde(rename = "RAMQuantity", skip_serializing_if = "Option::is_none")]
    pub ram_quantity: Option<i64>,
}

impl ServerIdRequest {
    pub fn new(server_id: i64) -> Self {
        Self {
            server_id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpRemoveRequest {
    pub ip_address_resource_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VlanPurchaseRequest {
    #[serde(rename = "VLanName")]
    pub vlan_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VlanRemoveRequest {
    #[serde(rename = "VLanResourceId")]
    pub vlan_resource_id: i64,
}

/// Payload wrapped under `VLanRequest` for attach/detach.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VlanRequest {
    pub network_adapter_id: i64,
    #[serde(rename = "VLanResourceId")]
    pub vlan_resource_id: i64,
    pub set_on_virtual_machine: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ips: Option<Vec<PrivateIp>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotRequest {
    pub server_id: i64,
    pub snapshot_operation_types: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodRequest {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduledOperationRequest {
    pub scheduled_operation_types: String,
    pub schedule_operation_label: String,
    #[serde(rename = "ServerID")]
    pub server_id: i64,
    pub schedule_start_date_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_end_date_time: Option<String>,
    pub schedule_frequency_type: String,
    pub scheduled_plan_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_montly_recurrence: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduledOperationIdRequest {
    pub scheduled_operation_id: i64,
}
