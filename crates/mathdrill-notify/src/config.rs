//! Configuration loading and sink factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mathdrill_core::model::{Difficulty, Operation};
use mathdrill_core::traits::NotificationSink;

use crate::http::HttpSink;
use crate::page::PageSink;

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathdrillConfig {
    /// Player name shown on reports; blank falls back to the placeholder.
    #[serde(default)]
    pub player_name: String,
    /// Default difficulty tier.
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// Default operation selector.
    #[serde(default = "default_operation")]
    pub operation: Operation,
    /// Results delivery settings.
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Results delivery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Base URL of the remote results endpoint, e.g. `http://localhost:3000`.
    #[serde(default)]
    pub results_url: Option<String>,
    /// Directory for locally rendered shareable results pages.
    #[serde(default)]
    pub page_dir: Option<PathBuf>,
    /// Recipients shown in rendered email previews.
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl NotifyConfig {
    /// Recipients with unconfigured placeholder entries filtered out.
    pub fn active_recipients(&self) -> Vec<String> {
        self.recipients
            .iter()
            .filter(|r| !r.contains("example.com"))
            .cloned()
            .collect()
    }
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

fn default_operation() -> Operation {
    Operation::Addition
}

impl Default for MathdrillConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            difficulty: default_difficulty(),
            operation: default_operation(),
            notify: NotifyConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable override: `MATHDRILL_RESULTS_URL`.
pub fn load_config() -> Result<MathdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MathdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MathdrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MathdrillConfig::default(),
    };

    if let Ok(url) = std::env::var("MATHDRILL_RESULTS_URL") {
        config.notify.results_url = Some(url);
    }

    config.notify.results_url = config
        .notify
        .results_url
        .as_deref()
        .map(resolve_env_vars)
        .filter(|u| !u.is_empty());
    config.notify.recipients = config
        .notify
        .recipients
        .iter()
        .map(|r| resolve_env_vars(r))
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}

/// Create the configured notification sinks.
///
/// An empty result means delivery is unconfigured; the game runs fine
/// without it.
pub fn create_sinks(config: &MathdrillConfig) -> Vec<Box<dyn NotificationSink>> {
    let mut sinks: Vec<Box<dyn NotificationSink>> = Vec::new();
    if let Some(url) = &config.notify.results_url {
        sinks.push(Box::new(HttpSink::new(url)));
    }
    if let Some(dir) = &config.notify.page_dir {
        sinks.push(Box::new(PageSink::new(dir.clone())));
    }
    sinks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MathdrillConfig::default();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.operation, Operation::Addition);
        assert!(config.player_name.is_empty());
        assert!(config.notify.results_url.is_none());
        assert!(create_sinks(&config).is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
player_name = "Autumn"
difficulty = "hard"
operation = "mixed"

[notify]
results_url = "http://localhost:3000"
page_dir = "./results"
recipients = ["dad@family.net", "grandma@example.com"]
"#;
        let config: MathdrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player_name, "Autumn");
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.operation, Operation::Mixed);
        assert_eq!(
            config.notify.results_url.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(config.notify.recipients.len(), 2);
        assert_eq!(create_sinks(&config).len(), 2);
    }

    #[test]
    fn placeholder_recipients_are_filtered() {
        let notify = NotifyConfig {
            results_url: None,
            page_dir: None,
            recipients: vec![
                "dad@family.net".into(),
                "grandma@example.com".into(),
            ],
        };
        assert_eq!(notify.active_recipients(), vec!["dad@family.net".to_string()]);
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MATHDRILL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MATHDRILL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MATHDRILL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_MATHDRILL_TEST_VAR");
    }

    #[test]
    fn config_file_with_env_reference() {
        std::env::set_var("_MATHDRILL_TEST_URL", "http://results.test:3000");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mathdrill.toml");
        std::fs::write(
            &path,
            "player_name = \"Autumn\"\n\n[notify]\nresults_url = \"${_MATHDRILL_TEST_URL}\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(
            config.notify.results_url.as_deref(),
            Some("http://results.test:3000")
        );
        std::env::remove_var("_MATHDRILL_TEST_URL");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("no_such_config.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn unresolved_env_reference_disables_the_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mathdrill.toml");
        std::fs::write(
            &path,
            "[notify]\nresults_url = \"${_MATHDRILL_UNSET_VAR}\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.notify.results_url.is_none());
    }
}
