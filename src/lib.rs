//! Resilient collector of 5-day INMET temperature forecasts.
//!
//! The binary drives a single browser-automation session over a fixed
//! list of municipality targets, strictly sequentially, and accumulates
//! the extracted records into CSV tables. The engineering weight is in
//! the fault-tolerant collection loop: session lifecycle with a
//! fallback creation ladder, bounded per-target retries, session-level
//! recovery, and incremental checkpointing.

pub mod browser;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod report;
pub mod session;
pub mod store;
pub mod targets;
pub mod types;
