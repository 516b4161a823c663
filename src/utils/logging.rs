//! Logger setup plus module-gated logging macros.
//!
//! A module opts into its log output with a module-level flag:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::log_info;
//!
//! log_info!("snapshot saved");
//! ```
//! Setting the flag to `false` silences that module without touching `RUST_LOG`.

use log::LevelFilter;

/// Initialize `env_logger`. `RUST_LOG` still wins over the default level;
/// `verbose` raises the default from `info` to `debug`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Debug logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Info logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
