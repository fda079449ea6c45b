//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TAXON_LOG";

/// Filter directive for the configured level, applied to every `taxon*` target.
pub fn default_directive(log_level: &str) -> String {
    format!("taxon={log_level}")
}

/// Initialize human-readable logging at the default level.
///
/// Reads `TAXON_LOG` for per-module levels, e.g.
/// `TAXON_LOG=taxon_inference=debug,taxon_core=warn`.
///
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
    init_tracing_with(&ObservabilityConfig::default());
}

/// Initialize logging from the observability config.
///
/// `TAXON_LOG` wins over `log_level` when set and valid. With `json_logs`
/// each event is a single JSON line. Shares the once-guard with
/// [`init_tracing`]; whichever runs first wins.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

        if config.json_logs {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .json()
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .init();
        }
    });
}
