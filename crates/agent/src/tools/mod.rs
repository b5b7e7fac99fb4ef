//! Host-supplied tools and their registry.

mod registry;
mod types;

pub use registry::ToolRegistry;
pub use types::{ParamSpec, ParamType, Tool, ToolError, ToolFuture};
