use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::quality::QualityConfig;

const CONFIG_HEADER: &str = "# video-curator engine config, CURATOR_* env vars take precedence\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub batch_size: usize,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

impl BatchConfig {
    /// Delay before retry number `attempt` (zero based): base * 2^attempt.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(factor))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub min_results: usize,
    pub strict_transition: bool,
    pub minimum_acceptable_tier: u8,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            min_results: 3,
            strict_transition: true,
            minimum_acceptable_tier: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub batch: BatchConfig,
    pub tiers: TierConfig,
    pub quality: QualityConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    /// Persists the config as TOML, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), String> {
        let body = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
        }
        std::fs::write(path, format!("{}{}", CONFIG_HEADER, body))
            .map_err(|err| format!("failed to write {}: {}", path.display(), err))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_parse::<usize>("CURATOR_BATCH_SIZE") {
            if value > 0 {
                self.batch.batch_size = value;
            }
        }
        if let Some(value) = env_parse::<u32>("CURATOR_MAX_RETRIES") {
            self.batch.max_retries = value;
        }
        if let Some(value) = env_parse::<u64>("CURATOR_RETRY_DELAY_MS") {
            self.batch.retry_base_delay_ms = value;
        }
        if let Some(value) = env_parse::<usize>("CURATOR_MIN_RESULTS") {
            self.tiers.min_results = value;
        }
        if let Some(value) = env_parse::<bool>("CURATOR_STRICT_TRANSITION") {
            self.tiers.strict_transition = value;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("CURATOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/curator.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_doubles_per_attempt() {
        let config = BatchConfig::default();
        assert_eq!(config.retry_delay(0), Duration::from_millis(1000));
        assert_eq!(config.retry_delay(1), Duration::from_millis(2000));
        assert_eq!(config.retry_delay(2), Duration::from_millis(4000));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str("[batch]\nbatch_size = 10\n").unwrap();
        assert_eq!(config.batch.batch_size, 10);
        assert_eq!(config.batch.max_retries, 3);
        assert_eq!(config.tiers.min_results, 3);
        assert!(config.tiers.strict_transition);
    }

    #[test]
    fn written_config_loads_back() {
        let dir =
            std::env::temp_dir().join(format!("video-curator-config-{}", std::process::id()));
        let path = dir.join("curator.toml");
        let mut config = EngineConfig::default();
        config.tiers.minimum_acceptable_tier = 2;
        config.quality.subscriber_threshold = 5_000;

        config.write(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# video-curator"));

        let (loaded, loaded_path) = EngineConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded_path, Some(path));
        assert_eq!(loaded.tiers.minimum_acceptable_tier, 2);
        assert_eq!(loaded.quality.subscriber_threshold, 5_000);

        let _ = std::fs::remove_dir_all(dir);
    }
}
