//! Provider connections
//!
//! Connection handles speaking the remote tool-invocation protocol. The
//! wire protocol itself is rmcp's concern; this module owns establishing
//! connections from catalog entries and exposing list/call operations.

mod connection;

pub use connection::{connect_by_id, HttpClientTransport, ProviderConnection};
