//! # Tracing Bootstrap
//!
//! Installs a `tracing-subscriber` fmt subscriber so the engine's events
//! (deprecation warnings, rejected inputs, usage errors) reach the
//! service's logs. Filtering follows `RUST_LOG`; output is text or JSON.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` or `json`, ignoring case. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Subscriber settings read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Read `LUFT_LOG_FORMAT` (`text` | `json`) and `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("LUFT_LOG_FORMAT").ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
        )
    }

    fn from_vars(format: Option<&str>, filter: Option<&str>) -> Self {
        let format = match format {
            Some(raw) => LogFormat::parse(raw).unwrap_or_else(|| {
                tracing::warn!(value = raw, "unknown LUFT_LOG_FORMAT, using text");
                LogFormat::Text
            }),
            None => LogFormat::Text,
        };
        let filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string();
        Self { format, filter }
    }
}

/// Install the global subscriber described by `config`.
///
/// Returns `false` when a subscriber was already installed; the existing
/// one is kept, so calling this more than once is harmless.
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.is_ok()
}
