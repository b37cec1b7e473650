//! Shared primitives for the netscope trace pipeline.
//!
//! This crate holds the pieces every other netscope crate agrees on:
//!
//! - [`SimTime`]: the raw simulator clock as it appears in trace logs
//!   (integer nanoseconds), with the float views used for plotting.
//! - [`logging`]: `tracing` subscriber bootstrap and span helpers.

pub mod logging;
pub mod time;

pub use logging::{file_span, init_logging, init_logging_with_level, render_span};
pub use time::SimTime;
