//! Schema conversion and argument coercion
//!
//! Turns a tool's JSON-schema input description into semantic parameter
//! metadata, and coerces caller-supplied argument values against that
//! metadata at invocation time. Conversion is a pure function of the
//! schema; metadata is derived once per tool and never re-derived.

mod coerce;
mod convert;

pub use coerce::coerce_argument;
pub use convert::{convert_input_schema, ParameterMetadata, SemanticType};
