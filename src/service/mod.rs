//! Service layer for the Aruba Cloud API.
//!
//! Each resource family is a trait with a [`Transport`](crate::sdk::Transport)
//! backed implementation. The [`Client`](crate::client::Client) holds one of
//! each.

pub mod cloud_servers;
pub mod datacenters;
pub mod hypervisors;
pub mod purchased_ips;
pub mod scheduled_tasks;
pub mod server_actions;
pub mod snapshots;
pub mod vlans;

#[cfg(test)]
pub(crate) mod testing;

pub use cloud_servers::{CloudServers, CloudServersService};
pub use datacenters::{DataCenters, DataCentersService};
pub use hypervisors::{Hypervisors, HypervisorsService};
pub use purchased_ips::{PurchasedIps, PurchasedIpsService};
pub use scheduled_tasks::{ScheduledTasks, ScheduledTasksService};
pub use server_actions::{CloudServerActions, CloudServerActionsService};
pub use snapshots::{Snapshots, SnapshotsService};
pub use vlans::{Vlans, VlansService};

use crate::error::{Error, Result};

/// Reject identifiers the API can never accept.
pub(crate) fn require_id(field: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::argument(field, format!("must be positive, got {}", id)));
    }
    Ok(())
}

/// Unwrap a single-entity result the API may answer with `null`.
pub(crate) fn required<T>(value: Option<T>, what: impl FnOnce() -> String) -> Result<T> {
    value.ok_or_else(|| Error::NotFound(what()))
}
