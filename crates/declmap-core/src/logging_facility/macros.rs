//! Operation boundary macros
//!
//! Every logged operation emits a `start` event, then either an `end` event
//! with `duration_ms` or an `end_error` event carrying the error's kind and
//! stable code. Extra `key = value` fields pass straight through to
//! `tracing`.

/// Shared expansion of the operation macros
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use declmap_core::log_op_start;
/// log_op_start!("commit");
/// log_op_start!("commit", staged = 1usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use declmap_core::log_op_end;
/// log_op_end!("commit", duration_ms = 3u64, rows = 1usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into `ExError`; its kind and code are
/// logged under `err.kind` / `err.code`.
///
/// ```
/// # use declmap_core::{log_op_error, DeclMapError};
/// log_op_error!("commit", DeclMapError::NotStaged, duration_ms = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__log_op_event!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
