//! Structured logging for declmap
//!
//! `init(profile)` installs the process subscriber once; everything else logs
//! through `tracing`. Operations are bracketed with `log_op_start!`,
//! `log_op_end!` and `log_op_error!` so every boundary event carries the
//! keys in [`crate::schema`]. Tests install [`init_test_capture`] instead.
//!
//! ```rust
//! use declmap_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
