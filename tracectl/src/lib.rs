// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Crate to control tracing dynamically at runtime.
//!
//! Library crates declare their tracing target once with [`trace_target!`]; the targets are
//! collected at link time and their levels can then be set by name or by tag from a single
//! configuration string (see [`TracingControl::setup_from_string`]).

pub mod control;
pub mod display;
pub mod targets;

// re-exports
pub use control::TraceCtlError;
pub use control::TracingControl;
pub use control::get_trace_ctl;
pub use tracing_subscriber::filter::LevelFilter;
