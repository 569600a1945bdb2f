//! Datacenter types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::null_default;
use crate::types::servers::CloudServerDetails;

/// Aruba Cloud datacenter region.
///
/// The numeric code doubles as the `dcN` part of the region's API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DataCenterRegion {
    #[default]
    Italy1,
    Italy2,
    CzechRepublic,
    France,
    Germany,
    UK,
    /// A region code this client does not know about.
    Other(i64),
}

impl DataCenterRegion {
    /// Numeric region code used by the API.
    pub fn code(&self) -> i64 {
        i64::from(*self)
    }

    /// Default API host for this region.
    pub fn api_host(&self) -> String {
        format!("https://api.dc{}.computing.cloud.it", self.code())
    }
}

impl From<i64> for DataCenterRegion {
    fn from(code: i64) -> Self {
        match code {
            1 => DataCenterRegion::Italy1,
            2 => DataCenterRegion::Italy2,
            3 => DataCenterRegion::CzechRepublic,
            4 => DataCenterRegion::France,
            5 => DataCenterRegion::Germany,
            6 => DataCenterRegion::UK,
            other => DataCenterRegion::Other(other),
        }
    }
}

impl From<DataCenterRegion> for i64 {
    fn from(region: DataCenterRegion) -> Self {
        match region {
            DataCenterRegion::Italy1 => 1,
            DataCenterRegion::Italy2 => 2,
            DataCenterRegion::CzechRepublic => 3,
            DataCenterRegion::France => 4,
            DataCenterRegion::Germany => 5,
            DataCenterRegion::UK => 6,
            DataCenterRegion::Other(code) => code,
        }
    }
}

impl std::fmt::Display for DataCenterRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataCenterRegion::Italy1 => write!(f, "Italy 1"),
            DataCenterRegion::Italy2 => write!(f, "Italy 2"),
            DataCenterRegion::CzechRepublic => write!(f, "Czech Republic"),
            DataCenterRegion::France => write!(f, "France"),
            DataCenterRegion::Germany => write!(f, "Germany"),
            DataCenterRegion::UK => write!(f, "UK"),
            DataCenterRegion::Other(code) => write!(f, "DC{}", code),
        }
    }
}

impl std::str::FromStr for DataCenterRegion {
    type Err = String;

    /// Accepts a region code (`1`..`6`), `dcN`, or a region name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        let code = normalized.strip_prefix("dc").unwrap_or(&normalized);
        if let Ok(code) = code.parse::<i64>() {
            return match DataCenterRegion::from(code) {
                DataCenterRegion::Other(_) => Err(format!("unknown datacenter code: {}", s)),
                region => Ok(region),
            };
        }

        match normalized.as_str() {
            "italy1" | "it1" => Ok(DataCenterRegion::Italy1),
            "italy2" | "it2" => Ok(DataCenterRegion::Italy2),
            "czechrepublic" | "cz" => Ok(DataCenterRegion::CzechRepublic),
            "france" | "fr" => Ok(DataCenterRegion::France),
            "germany" | "de" => Ok(DataCenterRegion::Germany),
            "uk" | "unitedkingdom" => Ok(DataCenterRegion::UK),
            _ => Err(format!("unknown datacenter region: {}", s)),
        }
    }
}

/// Summary of everything purchased in the account's virtual datacenter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VirtualDatacenter {
    #[serde(deserialize_with = "null_default")]
    pub custom_product_entities: Vec<Value>,
    #[serde(rename = "DatacenterId")]
    pub datacenter_region: DataCenterRegion,
    #[serde(rename = "FTP")]
    pub ftp: Option<Value>,
    #[serde(deserialize_with = "null_default")]
    pub ip_addresses: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub load_balancers: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub plesk_licenses: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub private_cloud_entities: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub public_ip_addresses: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub servers: Vec<CloudServerDetails>,
    #[serde(deserialize_with = "null_default")]
    pub shared_storages: Vec<Value>,
    #[serde(rename = "VLans", deserialize_with = "null_default")]
    pub vlans: Vec<Value>,
}
