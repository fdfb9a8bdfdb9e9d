// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging bootstrap shared by the PXF fragment crates
//!
//! Library crates log through the `log` facade. Binaries call
//! [`init_diagnostics`] once at startup to install a stderr backend.
//!
//! Usage:
//! - Set PXF_LOG=off (default) - no logs
//! - Set PXF_LOG=info - per-query assignment summaries
//! - Set PXF_LOG=debug - fragment list dumps and partition decisions

use std::sync::Once;

pub use log;
pub use log::LevelFilter;

/// Environment variable consulted by [`init_diagnostics`]
pub const LOG_ENV_VAR: &str = "PXF_LOG";

static INIT: Once = Once::new();

/// Map a `PXF_LOG` value to a level filter. Unknown values yield `None`.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize diagnostics based on the PXF_LOG environment variable
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    let raw = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "off".to_string());
    match parse_level(&raw) {
        Some(level) => init_with_level(level),
        None => {
            init_with_level(LevelFilter::Info);
            log::warn!("Unknown {LOG_ENV_VAR} value '{raw}', using 'info'");
        }
    }
}

/// Initialize diagnostics with an explicit level, ignoring the environment
pub fn init_with_level(level: LevelFilter) {
    INIT.call_once(|| {
        if level == LevelFilter::Off {
            return;
        }
        // try_init: a test harness may already own the global logger
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp_millis()
            .target(env_logger::Target::Stderr)
            .try_init();
    });
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
