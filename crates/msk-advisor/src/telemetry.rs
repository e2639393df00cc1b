use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter directives used when `RUST_LOG` is unset: the configured level
/// for the dashboard, with the HTTP stack quieted outside development.
fn default_directives(environment: AppEnvironment, log_level: &str) -> String {
    match environment {
        AppEnvironment::Development => log_level.to_string(),
        AppEnvironment::Test | AppEnvironment::Production => {
            format!("{log_level},hyper=warn,tower=warn")
        }
    }
}

pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let value = default_directives(environment, &config.log_level);
            EnvFilter::try_new(&value)
                .map_err(|source| TelemetryError::EnvFilter { value, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        // Module targets only matter when reading logs next to the code.
        .with_target(environment == AppEnvironment::Development)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_quiets_the_http_stack() {
        let directives = default_directives(AppEnvironment::Production, "info");
        assert_eq!(directives, "info,hyper=warn,tower=warn");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn development_keeps_the_configured_level_alone() {
        assert_eq!(default_directives(AppEnvironment::Development, "debug"), "debug");
    }
}
