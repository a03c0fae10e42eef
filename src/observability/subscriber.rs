//! Global `tracing` subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Installs a stderr subscriber for the process.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// subscriber was already installed, which leaves the existing one active.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.is_ok()
}
