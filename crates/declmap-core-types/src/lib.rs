//! declmap core types - shared vocabulary for the declmap workspace
//!
//! This crate provides:
//! - **Schema constants**: Canonical field keys and event names used by
//!   structured logging and error reporting

pub mod schema;
