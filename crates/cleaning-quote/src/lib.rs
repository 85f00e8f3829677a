//! Quote engine for cleaning jobs.
//!
//! The [`quoting`] module turns property attributes, a service selection, and an administrator
//! tuned [`quoting::PricingConfiguration`] into billable hours and a quoted price. The remaining
//! modules carry the process-level concerns shared by callers of the engine.

pub mod config;
pub mod error;
pub mod quoting;
pub mod telemetry;
