//! Top-level command orchestration.
pub mod convert;
