//! Aruba Cloud SDK plumbing.
//!
//! # Architecture
//!
//! - `api_client` - HTTP client for the WsEndUser JSON API
//! - `credentials` - Credential and API host resolution
//! - `transport` - Transport trait the services talk to
//! - `wait` - Polling until enqueued jobs take effect
//! - `types` - Envelope, request bodies and client options

pub mod api_client;
pub mod credentials;
pub mod transport;
pub mod types;
pub mod wait;

pub use api_client::{ApiClient, RequestCallback, RequestInfo};
pub use credentials::{resolve_api_host, resolve_credentials, Credentials};
pub use transport::Transport;
pub use types::*;
pub use wait::{
    wait_for_named, wait_for_server_named, wait_for_server_status, wait_for_status, Named,
    ServerListing, ServerStateSource, Stateful, WaitSpec,
};
