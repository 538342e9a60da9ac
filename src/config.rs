//! Client configuration.
//!
//! Construction-time knobs for the submission surface. Everything here is
//! an explicit field handed to the series builder -- there is no ambient
//! or class-level default state -- so construction stays deterministic
//! and testable.

use error::Error;
use metric::MetricKind;
use toml;

/// How a successful submission acknowledges.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Return an empty structured acknowledgment.
    Structured,
    /// Return nothing; the absence of an error is the success signal.
    Raw,
}

/// Configuration for the submission client.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The host a series is scoped to when the caller does not say
    /// otherwise. Callers may still suppress the host entirely per
    /// submission.
    pub default_host: Option<String>,
    /// Acknowledgment shape for successful submissions.
    pub response_mode: ResponseMode,
    /// The kind a series gets when the caller specifies none.
    pub default_metric_type: MetricKind,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            default_host: None,
            response_mode: ResponseMode::Raw,
            default_metric_type: MetricKind::Gauge,
        }
    }
}

/// Parse a `Config` from TOML text. Missing fields take their defaults.
pub fn parse_config(buffer: &str) -> Result<Config, Error> {
    let config: Config = toml::from_str(buffer)?;
    Ok(config)
}
