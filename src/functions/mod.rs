//! Callable functions
//!
//! Turns discovered tools into locally invokable functions and hands
//! them to a registry.
//!
//! # Architecture
//!
//! - `CallableFunction`: trait for invokable functions
//! - `ToolFunction`: MCP-backed implementation (coerce arguments, call
//!   the remote tool, extract the textual result)
//! - `ProviderFunctionSet`: functions grouped by provider id
//! - `FunctionRegistry`: flat lookup registry, namespaced per provider
//!
//! # Namespacing
//!
//! Functions are namespaced with their provider id so identically-named
//! tools from different providers never collide:
//! - Provider id: `filesystem`
//! - Original tool name: `read_file`
//! - Exposed name: `filesystem__read_file`

mod adapter;
mod function;
mod registry;
mod set;

pub use adapter::{qualified_name, ToolFunction};
pub use function::CallableFunction;
pub use registry::FunctionRegistry;
pub use set::ProviderFunctionSet;
