//! CLI configuration from environment.

use anyhow::Result;
use flightplan_core::config::DEFAULT_ARC_POINTS;
use flightplan_core::{EngineConfig, ProjectionConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` centers the projection on the route's departure point
    pub reference_meridian_deg: Option<f64>,
    pub scale_factor: f64,
    pub arc_points: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let projection = ProjectionConfig::default();
        Self {
            reference_meridian_deg: lookup("FLIGHTPLAN_REFERENCE_MERIDIAN")
                .and_then(|s| s.parse().ok()),
            scale_factor: lookup("FLIGHTPLAN_SCALE_FACTOR")
                .and_then(|s| s.parse().ok())
                .unwrap_or(projection.scale_factor),
            arc_points: lookup("FLIGHTPLAN_ARC_POINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ARC_POINTS),
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(LogFormat::Text),
        }
    }

    pub fn engine_config(&self, departure_lon: f64) -> EngineConfig {
        EngineConfig {
            projection: ProjectionConfig {
                reference_meridian_deg: self.reference_meridian_deg.unwrap_or(departure_lon),
                scale_factor: self.scale_factor,
                ..ProjectionConfig::default()
            },
            arc_points: self.arc_points,
        }
    }
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("flightplan_core=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.reference_meridian_deg, None);
        assert_eq!(config.arc_points, DEFAULT_ARC_POINTS);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.engine_config(36.0).projection.reference_meridian_deg, 36.0);
    }

    #[test]
    fn test_reads_values_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FLIGHTPLAN_REFERENCE_MERIDIAN", "33"),
            ("FLIGHTPLAN_ARC_POINTS", "not-a-number"),
            ("LOG_FORMAT", "JSON"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.reference_meridian_deg, Some(33.0));
        assert_eq!(config.arc_points, DEFAULT_ARC_POINTS);
        assert_eq!(config.log_format, LogFormat::Json);

        let engine = config.engine_config(36.0);
        assert_eq!(engine.projection.reference_meridian_deg, 33.0);
        assert!(engine.projector().is_ok());
    }
}
