use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

use crate::config::LogLevel;

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!(%level, "Logging initialized; override level with RUST_LOG");
    }
}
