//! Wire types for the Aruba Cloud API.
//!
//! Field names follow the API's PascalCase JSON. Records tolerate missing
//! fields, and list fields tolerate explicit `null`s.

pub mod datacenter;
pub mod hypervisor;
pub mod network;
pub mod scheduled;
pub mod servers;

// Re-export commonly used types
pub use datacenter::*;
pub use hypervisor::*;
pub use network::*;
pub use scheduled::*;
pub use servers::*;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
