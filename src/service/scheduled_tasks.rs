//! Scheduled operations on cloud servers.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

use crate::error::{Error, Result};
use crate::sdk::transport::{call, call_unit, list_or_empty, wrapped, Transport};
use crate::sdk::types::{PeriodRequest, ScheduledOperationIdRequest, ScheduledOperationRequest};
use crate::service::require_id;
use crate::types::{Period, ScheduledTask, ScheduledTaskCreateRequest};

const LIST_ACTION: &str = "GetScheduledOperations";
const ADD_ACTION: &str = "SetAddServerScheduledOperation";
const UPDATE_ACTION: &str = "SetUpdateServerScheduledOperation";
const REMOVE_ACTION: &str = "SetRemoveServerScheduledOperation";

/// Scheduled server operations.
#[async_trait]
pub trait ScheduledTasksService: Send + Sync {
    /// Operations scheduled within `period`.
    async fn list(&self, period: &Period) -> Result<Vec<ScheduledTask>>;

    async fn add(&self, request: &ScheduledTaskCreateRequest) -> Result<()>;

    async fn update(&self, scheduled_operation_id: i64) -> Result<()>;

    async fn remove(&self, scheduled_operation_id: i64) -> Result<()>;
}

/// Transport-backed [`ScheduledTasksService`].
#[derive(Clone)]
pub struct ScheduledTasks {
    transport: Arc<dyn Transport>,
}

impl ScheduledTasks {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn check_window(start: &DateTime<Utc>, end: Option<&DateTime<Utc>>) -> Result<()> {
    match end {
        Some(end) if end < start => Err(Error::argument(
            "EndDate",
            format!("{} precedes start {}", format_date(end), format_date(start)),
        )),
        _ => Ok(()),
    }
}

/// Build the creation body for `request`.
pub fn add_payload(request: &ScheduledTaskCreateRequest) -> Result<ScheduledOperationRequest> {
    require_id("ServerID", request.server_id)?;
    if request.label.trim().is_empty() {
        return Err(Error::argument("ScheduleOperationLabel", "cannot be empty"));
    }
    check_window(&request.start, request.end.as_ref())?;

    Ok(ScheduledOperationRequest {
        scheduled_operation_types: request.operation_type.operation_name(),
        schedule_operation_label: request.label.clone(),
        server_id: request.server_id,
        schedule_start_date_time: format_date(&request.start),
        schedule_end_date_time: request.end.as_ref().map(format_date),
        schedule_frequency_type: request.frequency_type.clone(),
        scheduled_plan_status: request.plan_status.clone(),
        scheduled_montly_recurrence: request.monthly_recurrence.clone(),
    })
}

#[async_trait]
impl ScheduledTasksService for ScheduledTasks {
    async fn list(&self, period: &Period) -> Result<Vec<ScheduledTask>> {
        check_window(&period.start, Some(&period.end))?;
        let body = wrapped(
            LIST_ACTION,
            &PeriodRequest {
                start_date: format_date(&period.start),
                end_date: format_date(&period.end),
            },
        )?;
        Ok(list_or_empty(call(&*self.transport, LIST_ACTION, &body).await?))
    }

    async fn add(&self, request: &ScheduledTaskCreateRequest) -> Result<()> {
        let body = add_payload(request)?;
        call_unit(&*self.transport, ADD_ACTION, &body).await?;
        info!(
            server_id = request.server_id,
            operation = %request.operation_type,
            "Scheduled operation added"
        );
        Ok(())
    }

    async fn update(&self, scheduled_operation_id: i64) -> Result<()> {
        require_id("ScheduledOperationId", scheduled_operation_id)?;
        let body = wrapped(
            UPDATE_ACTION,
            &ScheduledOperationIdRequest {
                scheduled_operation_id,
            },
        )?;
        call_unit(&*self.transport, UPDATE_ACTION, &body).await?;
        info!(scheduled_operation_id, "Scheduled operation updated");
        Ok(())
    }

    async fn remove(&self, scheduled_operation_id: i64) -> Result<()> {
        require_id("ScheduledOperationId", scheduled_operation_id)?;
        call_unit(
            &*self.transport,
            REMOVE_ACTION,
            &ScheduledOperationIdRequest {
                scheduled_operation_id,
            },
        )
        .await?;
        info!(scheduled_operation_id, "Scheduled operation removed");
        Ok(())
    }
}
