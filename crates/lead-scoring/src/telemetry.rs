use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    InvalidFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the process-wide subscriber. `RUST_LOG` wins over the
/// configured level so operators can raise verbosity without redeploying.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = resolve_filter(&config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn resolve_filter(configured: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(configured).map_err(|source| TelemetryError::InvalidFilter {
                value: configured.to_string(),
                source,
            })
        }
    }
}
