//! Logging setup.

use eyre::Result;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize console logging.
///
/// `RUST_LOG` takes priority. Otherwise the level is picked from the
/// verbosity: `info` by default, `debug` for `-v` and `trace` beyond that.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbosity)))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| {
            eyre::eyre!("Failed to initialize tracing subscriber: {}", e)
        })?;

    tracing::debug!(verbosity, "Logging initialized");

    Ok(())
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
