//! Aruba Cloud client - Rust Implementation
//!
//! A client for the Aruba Cloud (WsEndUser) control-plane API: cloud server
//! lifecycle, power actions, snapshots, scheduled operations, purchased IPs
//! and VLANs.
//!
//! # Architecture
//!
//! 1. **SDK Layer** (`sdk`) - HTTP transport, credentials, waiting on enqueued jobs
//! 2. **Service Layer** (`service`) - One trait and implementation per resource family
//! 3. **Client** (`client`) - Holds every service over a shared transport
//!
//! Mutating API actions only enqueue a job. Operations that depend on the
//! job's effect (delete, power-cycle, reinitialize, create-and-wait) poll
//! through [`sdk::wait`] until the server reaches the required state.

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sdk;
pub mod service;
pub mod types;

pub use client::Client;
pub use error::{Error, Result};

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
