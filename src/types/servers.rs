//! Cloud server types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::datacenter::DataCenterRegion;
use crate::types::hypervisor::{HypervisorType, OsTemplateDetails};
use crate::types::network::NetworkAdapter;
use crate::types::scheduled::ScheduledTask;
use crate::types::null_default;

/// Power/provisioning status of a cloud server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ServerStatus {
    #[default]
    CreationInProgress,
    Off,
    On,
    /// A status code this client does not know about.
    Unknown(i64),
}

impl From<i64> for ServerStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => ServerStatus::CreationInProgress,
            2 => ServerStatus::Off,
            3 => ServerStatus::On,
            other => ServerStatus::Unknown(other),
        }
    }
}

impl From<ServerStatus> for i64 {
    fn from(status: ServerStatus) -> Self {
        match status {
            ServerStatus::CreationInProgress => 1,
            ServerStatus::Off => 2,
            ServerStatus::On => 3,
            ServerStatus::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerStatus::CreationInProgress => write!(f, "CREATION IN PROGRESS"),
            ServerStatus::Off => write!(f, "OFF"),
            ServerStatus::On => write!(f, "ON"),
            ServerStatus::Unknown(code) => write!(f, "UNKNOWN ({})", code),
        }
    }
}

/// Cloud server summary, as returned by the server listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CloudServer {
    pub busy: bool,
    #[serde(rename = "CPUQuantity")]
    pub cpu_quantity: i64,
    pub company_id: i64,
    pub datacenter_id: DataCenterRegion,
    #[serde(rename = "HDQuantity")]
    pub hd_quantity: i64,
    #[serde(rename = "HDTotalSize")]
    pub hd_total_size: i64,
    pub hypervisor_server_type: i64,
    pub hypervisor_type: HypervisorType,
    pub name: String,
    #[serde(rename = "OSTemplateId")]
    pub os_template_id: i64,
    #[serde(rename = "RAMQuantity")]
    pub ram_quantity: i64,
    pub server_id: i64,
    pub server_status: ServerStatus,
    pub user_id: i64,
}

/// Full description of a single cloud server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CloudServerDetails {
    #[serde(deserialize_with = "null_default")]
    pub active_jobs: Vec<ActiveJob>,
    #[serde(rename = "CPUQuantity")]
    pub cpu_quantity: CpuQuantity,
    pub company_id: i64,
    pub control_tool_activation_date: Option<String>,
    pub control_tool_installed: bool,
    pub creation_date: Option<String>,
    pub datacenter_id: DataCenterRegion,
    #[serde(rename = "EasyCloudIPAddress")]
    pub easy_cloud_ip_address: Option<Value>,
    #[serde(rename = "EasyCloudPackageID")]
    pub easy_cloud_package_id: Option<i64>,
    pub hypervisor_server_type: i64,
    pub hypervisor_type: HypervisorType,
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub network_adapters: Vec<NetworkAdapter>,
    pub note: Option<String>,
    #[serde(rename = "OSTemplate")]
    pub os_template: OsTemplateDetails,
    #[serde(deserialize_with = "null_default")]
    pub parameters: Vec<Value>,
    #[serde(rename = "RAMQuantity")]
    pub ram_quantity: RamQuantity,
    pub renew_date_smart: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub scheduled_operations: Vec<ScheduledTask>,
    pub server_id: i64,
    pub server_status: ServerStatus,
    #[serde(deserialize_with = "null_default")]
    pub snapshots: Vec<Value>,
    pub tools_available: bool,
    pub user_id: i64,
    #[serde(rename = "VirtualDVDs", deserialize_with = "null_default")]
    pub virtual_dvds: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub virtual_disks: Vec<VirtualDisk>,
    pub vnc_port: Option<i64>,
}

/// Job currently queued or running against a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActiveJob {
    pub job_id: i64,
    pub status: i64,
    pub operation_name: String,
    pub progress: i64,
    pub server_id: i64,
    pub server_name: String,
    pub creation_date: Option<String>,
    pub last_update_date: Option<String>,
    pub license_id: Option<Value>,
    pub resource_id: i64,
    pub resource_value: Option<Value>,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CpuQuantity {
    pub company_id: i64,
    pub product_id: i64,
    pub resource_id1: i64,
    pub resource_type: i64,
    pub user_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RamQuantity {
    pub company_id: i64,
    pub product_id: i64,
    pub resource_id: i64,
    pub resource_type: i64,
    pub user_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VirtualDisk {
    pub company_id: i64,
    pub product_id: i64,
    pub resource_id: i64,
    pub resource_type: i64,
    pub user_id: i64,
    pub creation_date: Option<String>,
    pub size: i64,
}

/// Preconfigured size of a Smart cloud server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CloudServerSmartType {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl TryFrom<i64> for CloudServerSmartType {
    type Error = String;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(CloudServerSmartType::Small),
            2 => Ok(CloudServerSmartType::Medium),
            3 => Ok(CloudServerSmartType::Large),
            4 => Ok(CloudServerSmartType::ExtraLarge),
            other => Err(format!("unknown smart package id: {}", other)),
        }
    }
}

impl From<CloudServerSmartType> for i64 {
    fn from(kind: CloudServerSmartType) -> Self {
        match kind {
            CloudServerSmartType::Small => 1,
            CloudServerSmartType::Medium => 2,
            CloudServerSmartType::Large => 3,
            CloudServerSmartType::ExtraLarge => 4,
        }
    }
}

impl std::fmt::Display for CloudServerSmartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudServerSmartType::Small => write!(f, "small"),
            CloudServerSmartType::Medium => write!(f, "medium"),
            CloudServerSmartType::Large => write!(f, "large"),
            CloudServerSmartType::ExtraLarge => write!(f, "extra-large"),
        }
    }
}

/// Disk requested for a new Pro server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudServerCreateVirtualDisk {
    pub virtual_disk_type: i64,
    /// Size in GB.
    pub size: i64,
}

/// Request body for a Cloud Pro server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudServerCreateRequestPro {
    pub name: String,
    pub administrator_password: String,
    #[serde(rename = "OSTemplateId")]
    pub os_template_id: i64,
    pub note: String,
    #[serde(rename = "CPUQuantity")]
    pub cpu_quantity: i64,
    #[serde(rename = "RAMQuantity")]
    pub ram_quantity: i64,
    pub virtual_disks: Vec<CloudServerCreateVirtualDisk>,
    pub network_adapters_configuration: Vec<NetworkAdapter>,
}

/// Request body for a Cloud Smart server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudServerCreateRequestSmart {
    pub name: String,
    pub administrator_password: String,
    #[serde(rename = "OSTemplateId")]
    pub os_template_id: i64,
    #[serde(rename = "SmartVMWarePackageID")]
    pub smart_type: CloudServerSmartType,
    pub note: String,
}

/// Either flavour of server creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CloudServerCreateRequest {
    Pro(CloudServerCreateRequestPro),
    Smart(CloudServerCreateRequestSmart),
}

impl CloudServerCreateRequest {
    /// Name the new server will carry.
    pub fn name(&self) -> &str {
        match self {
            CloudServerCreateRequest::Pro(r) => &r.name,
            CloudServerCreateRequest::Smart(r) => &r.name,
        }
    }
}

/// Parameters for reinstalling a server's operating system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerReinitializeRequest {
    pub server_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub administrator_password: String,
    #[serde(rename = "OSTemplateID", skip_serializing_if = "is_zero")]
    pub os_template_id: i64,
    #[serde(rename = "ConfigureIPv6", skip_serializing_if = "std::ops::Not::not")]
    pub configure_ipv6: bool,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_status_codes() {
        let status: ServerStatus = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(status, ServerStatus::Off);
        assert_eq!(serde_json::to_value(ServerStatus::On).unwrap(), json!(3));
        assert_eq!(ServerStatus::from(9), ServerStatus::Unknown(9));
        assert_eq!(ServerStatus::CreationInProgress.to_string(), "CREATION IN PROGRESS");
    }

    #[test]
    fn test_cloud_server_from_listing() {
        let server: CloudServer = serde_json::from_value(json!({
            "Busy": false,
            "CPUQuantity": 2,
            "DatacenterId": 2,
            "HypervisorType": 4,
            "Name": "web-1",
            "RAMQuantity": 4,
            "ServerId": 3401,
            "ServerStatus": 3
        }))
        .unwrap();

        assert_eq!(server.name, "web-1");
        assert_eq!(server.server_id, 3401);
        assert_eq!(server.cpu_quantity, 2);
        assert_eq!(server.server_status, ServerStatus::On);
        assert_eq!(server.datacenter_id, DataCenterRegion::Italy2);
        assert_eq!(server.hypervisor_type, HypervisorType::VmwareCloudSmart);
    }

    #[test]
    fn test_details_tolerate_nulls_and_missing_fields() {
        let details: CloudServerDetails = serde_json::from_value(json!({
            "ServerId": 12,
            "Name": "db",
            "ServerStatus": 2,
            "Note": null,
            "VirtualDisks": [{"Size": 20}],
            "ActiveJobs": [{"JobId": 7, "OperationName": "PowerOff", "Progress": 50}]
        }))
        .unwrap();

        assert_eq!(details.server_status, ServerStatus::Off);
        assert!(details.note.is_none());
        assert_eq!(details.virtual_disks[0].size, 20);
        assert_eq!(details.active_jobs[0].operation_name, "PowerOff");
    }

    #[test]
    fn test_smart_request_serialization() {
        let request = CloudServerCreateRequest::Smart(CloudServerCreateRequestSmart {
            name: "small-box".to_string(),
            administrator_password: "s3cret!".to_string(),
            os_template_id: 1761,
            smart_type: CloudServerSmartType::Medium,
            note: String::new(),
        });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["SmartVMWarePackageID"], json!(2));
        assert_eq!(value["OSTemplateId"], json!(1761));
        assert_eq!(request.name(), "small-box");
    }

    #[test]
    fn test_pro_request_serialization() {
        let request = CloudServerCreateRequest::Pro(CloudServerCreateRequestPro {
            name: "pro-box".to_string(),
            administrator_password: "s3cret!".to_string(),
            os_template_id: 415,
            cpu_quantity: 2,
            ram_quantity: 4,
            virtual_disks: vec![CloudServerCreateVirtualDisk {
                virtual_disk_type: 0,
                size: 20,
            }],
            ..Default::default()
        });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["OSTemplateId"], json!(415));
        assert!(value.get("OsTemplateId").is_none());
        assert_eq!(value["CPUQuantity"], json!(2));
        assert_eq!(value["RAMQuantity"], json!(4));
        assert_eq!(value["VirtualDisks"][0]["Size"], json!(20));
    }

    #[test]
    fn test_reinitialize_omits_empty_fields() {
        let request = ServerReinitializeRequest {
            server_id: 5,
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"ServerId": 5}));

        let request = ServerReinitializeRequest {
            server_id: 5,
            administrator_password: "pw".to_string(),
            os_template_id: 80,
            configure_ipv6: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["OSTemplateID"], json!(80));
        assert_eq!(value["ConfigureIPv6"], json!(true));
    }
}
