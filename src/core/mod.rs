//! Core shared types

mod error;

pub use error::{BridgeError, BridgeResult};
