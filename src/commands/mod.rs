//! Command implementations
//!
//! Each submodule wires the graph gateway and the pipeline together for one
//! CLI command and renders its result.

pub mod completions;
pub mod install;
pub mod resolve;
pub mod version;
