//! Scheduled operation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::null_default;

/// Kind of operation a scheduled task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ScheduledTaskType {
    SwitchOn,
    ForceShutdown,
    SwitchOff,
    CreateSnapshot,
    RestoreSnapshot,
    DeleteSnapshot,
    Other(i64),
}

impl ScheduledTaskType {
    /// Name the API expects in `ScheduledOperationTypes`.
    pub fn operation_name(&self) -> String {
        match self {
            ScheduledTaskType::SwitchOn => "SwitchOn".to_string(),
            ScheduledTaskType::ForceShutdown => "ForceShutdown".to_string(),
            ScheduledTaskType::SwitchOff => "SwitchOff".to_string(),
            ScheduledTaskType::CreateSnapshot => "CreateSnapshot".to_string(),
            ScheduledTaskType::RestoreSnapshot => "RestoreSnapshot".to_string(),
            ScheduledTaskType::DeleteSnapshot => "DeleteSnapshot".to_string(),
            ScheduledTaskType::Other(code) => code.to_string(),
        }
    }
}

impl Default for ScheduledTaskType {
    fn default() -> Self {
        ScheduledTaskType::Other(0)
    }
}

impl From<i64> for ScheduledTaskType {
    fn from(code: i64) -> Self {
        match code {
            2 => ScheduledTaskType::SwitchOn,
            3 => ScheduledTaskType::ForceShutdown,
            25 => ScheduledTaskType::SwitchOff,
            27 => ScheduledTaskType::CreateSnapshot,
            28 => ScheduledTaskType::RestoreSnapshot,
            29 => ScheduledTaskType::DeleteSnapshot,
            other => ScheduledTaskType::Other(other),
        }
    }
}

impl From<ScheduledTaskType> for i64 {
    fn from(kind: ScheduledTaskType) -> Self {
        match kind {
            ScheduledTaskType::SwitchOn => 2,
            ScheduledTaskType::ForceShutdown => 3,
            ScheduledTaskType::SwitchOff => 25,
            ScheduledTaskType::CreateSnapshot => 27,
            ScheduledTaskType::RestoreSnapshot => 28,
            ScheduledTaskType::DeleteSnapshot => 29,
            ScheduledTaskType::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ScheduledTaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduledTaskType::SwitchOn => write!(f, "Switch On"),
            ScheduledTaskType::ForceShutdown => write!(f, "Force Shutdown"),
            ScheduledTaskType::SwitchOff => write!(f, "Switch Off"),
            ScheduledTaskType::CreateSnapshot => write!(f, "Create snapshot"),
            ScheduledTaskType::RestoreSnapshot => write!(f, "Restore Snapshot"),
            ScheduledTaskType::DeleteSnapshot => write!(f, "Delete snapshot"),
            ScheduledTaskType::Other(code) => write!(f, "Operation {}", code),
        }
    }
}

/// A scheduled operation attached to a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduledTask {
    pub server_id: i64,
    pub server_name: String,
    pub operation_type: ScheduledTaskType,
    #[serde(deserialize_with = "null_default")]
    pub operation_parameter: Vec<Value>,
    #[serde(rename = "ScheduledOperationID")]
    pub scheduled_operation_id: i64,
    pub scheduled_plan: ScheduledPlan,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduledPlan {
    pub first_execution_time: Option<String>,
    pub last_execution_time: Option<String>,
    pub schedule_days_of_month: Option<Value>,
    pub schedule_end_date_time: Option<Value>,
    pub schedule_frequency: Option<Value>,
    pub schedule_frequency_type: i64,
    pub schedule_operation_label: Option<String>,
    pub schedule_start_date_time: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub schedule_week_days: Vec<Value>,
    pub scheduled_montly_recurrence: Option<Value>,
    pub scheduled_owner_type: i64,
    pub scheduled_plan_id: i64,
    pub scheduled_plan_status: i64,
}

/// Time window for listing scheduled operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parameters for a new scheduled operation.
#[derive(Debug, Clone)]
pub struct ScheduledTaskCreateRequest {
    pub server_id: i64,
    pub operation_type: ScheduledTaskType,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    /// Recurrence, passed through as the API's frequency type name.
    pub frequency_type: String,
    /// Plan status, passed through as the API's status name.
    pub plan_status: String,
    pub monthly_recurrence: Option<String>,
}
