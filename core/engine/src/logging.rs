//! FILENAME: core/engine/src/logging.rs
// PURPOSE: Category-tagged logging shared by the report crates.
// CONTEXT: Every line carries a short category ("TABLE", "LOAD", "HTML", ...)
//          which becomes the `log` target. The host application decides
//          which logger backs the facade; library code never installs one.

#[doc(hidden)]
pub use log;

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::error!(target: $cat, $($arg)*)
    };
}

// Re-export the macros so they can be imported via `use report_engine::logging::log_info;`
pub use log_debug;
pub use log_info;
pub use log_warn;
pub use log_error;
