//! Deterministic investor-profile classification.
//!
//! The [`quiz`] module holds the rule dataset, the scoring pipeline, and the
//! assessment service facade; [`config`], [`telemetry`], and [`error`] carry
//! the ambient concerns shared with the API binary.

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;
