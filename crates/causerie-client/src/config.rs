//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client runs with zero configuration;
//! command-line flags override the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Base artificial latency applied to mutating operations.
pub const DEFAULT_LATENCY_MS: u64 = 300;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `causerie.db`.
    /// Env: `CAUSERIE_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Simulated round-trip delay of a mutating call.  Reactions and status
    /// views take half of it, server identity assignment twice.
    /// Env: `CAUSERIE_LATENCY_MS`
    /// Default: 300 ms.
    pub latency: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("CAUSERIE_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(value) = std::env::var("CAUSERIE_LATENCY_MS") {
            match parse_latency(&value) {
                Some(latency) => config.latency = latency,
                None => {
                    tracing::warn!(value = %value, "Invalid CAUSERIE_LATENCY_MS, using default");
                }
            }
        }

        config
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, latency_ms: Option<u64>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        if let Some(ms) = latency_ms {
            self.latency = Duration::from_millis(ms);
        }
        self
    }

    /// Configuration with no artificial delay, storing under `data_dir`.
    pub fn instant(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            latency: Duration::ZERO,
        }
    }
}

/// Parse a latency given in whole milliseconds.
fn parse_latency(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.latency, Duration::from_millis(300));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_parse_latency() {
        assert_eq!(parse_latency("0"), Some(Duration::ZERO));
        assert_eq!(parse_latency(" 150 "), Some(Duration::from_millis(150)));
        assert_eq!(parse_latency("-5"), None);
        assert_eq!(parse_latency("fast"), None);
    }

    #[test]
    fn test_overrides_win() {
        let config = ClientConfig::default().with_overrides(Some("/tmp/c".into()), Some(0));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/c")));
        assert_eq!(config.latency, Duration::ZERO);

        let untouched = ClientConfig::default().with_overrides(None, None);
        assert_eq!(untouched, ClientConfig::default());
    }
}
