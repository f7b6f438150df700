use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context, Result};
use galaxy_schema::Dataset;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "assistant.yaml";
pub const MAX_RESPONSE_DELAY_MS: u64 = 60_000;

fn default_response_delay_ms() -> u64 {
    1500
}

fn default_submit_while_pending() -> bool {
    true
}

fn default_bus_capacity() -> usize {
    64
}

/// Which dataset the unsupported-query fallback echoes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetBinding {
    /// Whatever the selector shows when the response is produced.
    #[default]
    AtCompletion,
    /// The dataset captured with the query.
    AtSubmission,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
    #[serde(default = "default_submit_while_pending")]
    pub submit_while_pending: bool,
    #[serde(default)]
    pub fallback_dataset: DatasetBinding,
    #[serde(default)]
    pub default_dataset: Dataset,
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            submit_while_pending: default_submit_while_pending(),
            fallback_dataset: DatasetBinding::default(),
            default_dataset: Dataset::default(),
            bus_capacity: default_bus_capacity(),
        }
    }
}

impl AssistantConfig {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

pub fn resolve_env_var(raw: &str) -> String {
    let mut output = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);

        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = &candidate[..end];
        output.push_str(&std::env::var(key).unwrap_or_default());
        rest = &candidate[end + 1..];
    }

    output.push_str(rest);
    output
}

/// Loads `assistant.yaml` from `config_dir`. A missing file yields defaults.
pub fn load_config(config_dir: &Path) -> Result<AssistantConfig> {
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("no {} at {}, using defaults", CONFIG_FILE, config_dir.display());
        return Ok(AssistantConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<AssistantConfig> {
    let resolved = resolve_env_var(content);
    let config: AssistantConfig =
        serde_yaml::from_str(&resolved).context("failed to parse yaml")?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &AssistantConfig) -> Result<()> {
    if config.response_delay_ms > MAX_RESPONSE_DELAY_MS {
        return Err(anyhow!(
            "response_delay_ms must be at most {MAX_RESPONSE_DELAY_MS}, got {}",
            config.response_delay_ms
        ));
    }
    if config.bus_capacity == 0 {
        return Err(anyhow!("bus_capacity must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture_config_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
    }

    #[test]
    fn loads_repository_config() {
        let config = load_config(&fixture_config_dir()).unwrap();
        assert_eq!(config.response_delay_ms, 1500);
        assert!(config.submit_while_pending);
        assert_eq!(config.fallback_dataset, DatasetBinding::AtCompletion);
        assert_eq!(config.default_dataset, Dataset::Lims);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.response_delay(), Duration::from_millis(1500));
        assert_eq!(config.bus_capacity, 64);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = parse_config(
            "fallback_dataset: at_submission\ndefault_dataset: ELN Data\n",
        )
        .unwrap();
        assert_eq!(config.fallback_dataset, DatasetBinding::AtSubmission);
        assert_eq!(config.default_dataset, Dataset::Eln);
        assert_eq!(config.response_delay_ms, 1500);
    }

    #[test]
    fn env_placeholders_are_resolved() {
        std::env::set_var("GALAXY_TEST_DELAY_MS", "250");
        let config = parse_config("response_delay_ms: ${GALAXY_TEST_DELAY_MS}\n").unwrap();
        assert_eq!(config.response_delay_ms, 250);
    }

    #[test]
    fn unterminated_placeholder_is_kept() {
        assert_eq!(resolve_env_var("delay ${OOPS"), "delay ${OOPS");
    }

    #[test]
    fn rejects_excessive_delay() {
        let err = parse_config("response_delay_ms: 600000\n").unwrap_err();
        assert!(format!("{err:#}").contains("response_delay_ms"));
    }

    #[test]
    fn rejects_zero_bus_capacity() {
        assert!(parse_config("bus_capacity: 0\n").is_err());
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "response_delay_ms: [oops").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }
}
