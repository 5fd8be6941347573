use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::errors::{FactoryError, Result};

/// Output format for [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG` (default `info`).
///
/// Resolution emits `trace` events per attribute and `debug` events for
/// registration and persistence, so `RUST_LOG=fixtura_factory=trace` shows
/// every value as it is produced.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_timer(UtcTime::rfc_3339()))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(UtcTime::rfc_3339()),
            )
            .try_init(),
    };

    installed.map_err(|err| FactoryError::Config(format!("logging: {err}")))
}

/// Route events through the test harness writer so they show up only for
/// failing tests. Safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
