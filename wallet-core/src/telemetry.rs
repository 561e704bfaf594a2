// wallet-core/src/telemetry.rs
//
// Tracing setup cho embedders (FFI, server, CLI).
// `RUST_LOG` luôn thắng level trong config.

use crate::config::{LogConfig, LogFormat};
use crate::error::{WalletError, WalletResult};
use tracing_subscriber::EnvFilter;

/// Cài global `tracing` subscriber.
///
/// Trả về `Ok(false)` nếu đã có subscriber (gọi lại nhiều lần là no-op).
pub fn init_tracing(config: &LogConfig) -> WalletResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            WalletError::Config(format!("invalid log level '{}': {}", config.level, e))
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Text => builder.try_init().is_ok(),
    };
    Ok(installed)
}
