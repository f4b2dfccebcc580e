//! Analyzer configuration
//!
//! Rule enable/disable lists, a severity floor, and per-rule severity
//! overrides. Loadable from YAML or JSON.

use crate::core::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Error loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Rule toggles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule codes to disable
    #[serde(default)]
    pub disable: Vec<String>,

    /// When non-empty, only these rule codes run
    #[serde(default)]
    pub enable: Vec<String>,
}

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RuleConfig,

    /// Diagnostics below this severity are dropped
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,

    /// Per-rule severity overrides (code -> severity)
    #[serde(default)]
    pub severity_overrides: HashMap<String, Severity>,
}

fn default_min_severity() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            min_severity: default_min_severity(),
            severity_overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file, chosen by extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        } else {
            serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    }

    /// Check whether a rule code is enabled
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        if self.rules.disable.iter().any(|c| c == code) {
            return false;
        }
        if !self.rules.enable.is_empty() {
            return self.rules.enable.iter().any(|c| c == code);
        }
        true
    }

    /// Effective severity for a rule, honoring overrides
    pub fn effective_severity(&self, code: &str, default: Severity) -> Severity {
        self.severity_overrides.get(code).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_enables_everything() {
        let config = Config::default();
        assert!(config.is_rule_enabled("RemoveProducesOrInject"));
        assert_eq!(config.min_severity, Severity::Info);
    }

    #[test]
    fn test_disable_list() {
        let mut config = Config::default();
        config.rules.disable.push("RemoveProducesOrInject".to_string());
        assert!(!config.is_rule_enabled("RemoveProducesOrInject"));
        assert!(config.is_rule_enabled("InvalidScopeOnManagedBean"));
    }

    #[test]
    fn test_enable_list_is_exclusive() {
        let mut config = Config::default();
        config.rules.enable.push("InvalidScopeOnManagedBean".to_string());
        assert!(config.is_rule_enabled("InvalidScopeOnManagedBean"));
        assert!(!config.is_rule_enabled("RemoveProducesOrInject"));
    }

    #[test]
    fn test_severity_override() {
        let mut config = Config::default();
        config
            .severity_overrides
            .insert("CompleteServletAnnotation".to_string(), Severity::Warning);
        assert_eq!(
            config.effective_severity("CompleteServletAnnotation", Severity::Error),
            Severity::Warning
        );
        assert_eq!(
            config.effective_severity("OtherRule", Severity::Error),
            Severity::Error
        );
    }

    #[test]
    fn test_load_yaml() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "rules:\n  disable:\n    - InvalidServletUrlPattern\nmin_severity: warning\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.is_rule_enabled("InvalidServletUrlPattern"));
        assert_eq!(config.min_severity, Severity::Warning);
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            "{{\"rules\": {{\"disable\": [\"InvalidEntityModifier\"]}}, \"min_severity\": \"error\"}}"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.is_rule_enabled("InvalidEntityModifier"));
        assert_eq!(config.min_severity, Severity::Error);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
