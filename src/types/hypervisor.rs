//! Hypervisor and OS template types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::null_default;

/// Virtualization platform a server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum HypervisorType {
    #[default]
    MicrosoftHyperV,
    VmwareCloudPro,
    MicrosoftHyperVLowCost,
    VmwareCloudSmart,
    Other(i64),
}

impl From<i64> for HypervisorType {
    fn from(code: i64) -> Self {
        match code {
            1 => HypervisorType::MicrosoftHyperV,
            2 => HypervisorType::VmwareCloudPro,
            3 => HypervisorType::MicrosoftHyperVLowCost,
            4 => HypervisorType::VmwareCloudSmart,
            other => HypervisorType::Other(other),
        }
    }
}

impl From<HypervisorType> for i64 {
    fn from(kind: HypervisorType) -> Self {
        match kind {
            HypervisorType::MicrosoftHyperV => 1,
            HypervisorType::VmwareCloudPro => 2,
            HypervisorType::MicrosoftHyperVLowCost => 3,
            HypervisorType::VmwareCloudSmart => 4,
            HypervisorType::Other(code) => code,
        }
    }
}

impl std::fmt::Display for HypervisorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HypervisorType::MicrosoftHyperV => write!(f, "Microsoft Hyper-V (Cloud Pro)"),
            HypervisorType::VmwareCloudPro => write!(f, "VMWare (Cloud Pro)"),
            HypervisorType::MicrosoftHyperVLowCost => {
                write!(f, "Microsoft Hyper-V Low Cost (Cloud Pro)")
            }
            HypervisorType::VmwareCloudSmart => write!(f, "VMWare (Cloud Smart)"),
            HypervisorType::Other(code) => write!(f, "Hypervisor {}", code),
        }
    }
}

/// A hypervisor and the OS templates it offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Hypervisor {
    pub hypervisor_server_type: i64,
    pub hypervisor_type: HypervisorType,
    #[serde(deserialize_with = "null_default")]
    pub templates: Vec<OsTemplate>,
}

/// Installable operating system image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OsTemplate {
    pub appliance_type: i64,
    pub architecture_type: i64,
    #[serde(rename = "CompanyID")]
    pub company_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub compatible_pre_configured_packages: Vec<Value>,
    pub description: String,
    pub enabled: bool,
    pub export_enabled: bool,
    #[serde(deserialize_with = "null_default")]
    pub feature_types: Vec<Value>,
    pub icon: Option<Value>,
    pub id: i64,
    pub identification_code: Option<String>,
    pub ipv6_compatible: bool,
    pub name: Option<String>,
    #[serde(rename = "OSFamily")]
    pub os_family: i64,
    #[serde(rename = "OSVersion")]
    pub os_version: Option<String>,
    pub owner_user_id: Option<String>,
    #[serde(rename = "ParentTemplateID")]
    pub parent_template_id: Option<i64>,
    pub product_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub resource_bounds: Vec<ResourceBounds>,
    pub revision: Option<String>,
    pub ssh_key_initialization_supported: bool,
    pub template_extended_description: Option<String>,
    pub template_ownership_type: i64,
    pub template_password: Option<String>,
    pub template_selling_status: i64,
    pub template_status: Option<Value>,
    pub template_type: i64,
    pub template_username: Option<String>,
    pub tools_available: bool,
}

/// Minimum, maximum and default quantity of a resource for a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceBounds {
    pub resource_type: i64,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

/// Template reference embedded in server details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OsTemplateDetails {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub resource_type: i64,
    pub resource_id: i64,
    pub company_id: i64,
    pub product_id: i64,
    pub user_id: i64,
}
