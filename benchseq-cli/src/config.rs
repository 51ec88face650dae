//! Configuration loading from benchseq.toml
//!
//! Benchseq configuration can be specified in a `benchseq.toml` file in the
//! project root. The configuration is automatically discovered by walking up
//! from the current directory; CLI flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Benchseq configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeqConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Runner configuration for suite execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Warm-up duration before measurement (e.g., "3s")
    #[serde(default = "default_warmup")]
    pub warmup_time: String,
    /// Measurement duration (e.g., "5s")
    #[serde(default = "default_measurement")]
    pub measurement_time: String,
    /// Samples collected per case (None = engine default)
    #[serde(default)]
    pub sample_size: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_time: default_warmup(),
            measurement_time: default_measurement(),
            sample_size: None,
        }
    }
}

fn default_warmup() -> String {
    "3s".to_string()
}
fn default_measurement() -> String {
    "5s".to_string()
}

impl SeqConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("benchseq.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parse a duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and the unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let nanos_per_unit: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok(Duration::from_nanos((value * nanos_per_unit as f64) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SeqConfig::default();
        assert_eq!(config.runner.warmup_time, "3s");
        assert_eq!(config.runner.measurement_time, "5s");
        assert_eq!(config.runner.sample_size, None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            SeqConfig::parse_duration("3s").unwrap(),
            Duration::from_secs(3)
        );
        assert_eq!(
            SeqConfig::parse_duration("500ms").unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(
            SeqConfig::parse_duration("100us").unwrap(),
            Duration::from_micros(100)
        );
        assert_eq!(
            SeqConfig::parse_duration("1000ns").unwrap(),
            Duration::from_nanos(1000)
        );
        assert_eq!(
            SeqConfig::parse_duration("2m").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            SeqConfig::parse_duration("1.5s").unwrap(),
            Duration::from_millis(1500)
        );
        // Bare numbers default to seconds
        assert_eq!(
            SeqConfig::parse_duration("4").unwrap(),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(SeqConfig::parse_duration("").is_err());
        assert!(SeqConfig::parse_duration("fast").is_err());
        assert!(SeqConfig::parse_duration("3 parsecs").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            warmup_time = "1s"
            sample_size = 25
        "#;

        let config: SeqConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.warmup_time, "1s");
        assert_eq!(config.runner.sample_size, Some(25));
        // Defaults should still apply
        assert_eq!(config.runner.measurement_time, "5s");
    }
}
