//! itemstat configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::interpret::BandThresholds;

/// Top-level itemstat configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemstatConfig {
    /// Output directory for written reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Threshold for flagging changes in `compare`.
    #[serde(default = "default_compare_threshold")]
    pub compare_threshold: f64,
    /// Whether to compute alpha-if-item-deleted.
    #[serde(default = "default_true")]
    pub alpha_if_deleted: bool,
    /// Interpretation band thresholds.
    #[serde(default)]
    pub bands: BandThresholds,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./itemstat-results")
}
fn default_format() -> String {
    "table".to_string()
}
fn default_compare_threshold() -> f64 {
    0.05
}
fn default_true() -> bool {
    true
}

impl Default for ItemstatConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            compare_threshold: default_compare_threshold(),
            alpha_if_deleted: true,
            bands: BandThresholds::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `itemstat.toml` in the current directory
/// 2. `~/.config/itemstat/config.toml`
///
/// Environment variable override: `ITEMSTAT_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ItemstatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("itemstat.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => ItemstatConfig::default(),
    };

    if let Ok(dir) = std::env::var("ITEMSTAT_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    let resolved = resolve_env_vars(&config.output_dir.to_string_lossy());
    config.output_dir = PathBuf::from(resolved);

    Ok(config)
}

/// Parse a config TOML string.
pub fn parse_config_str(content: &str) -> Result<ItemstatConfig> {
    let config: ItemstatConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.compare_threshold >= 0.0,
        "compare_threshold must not be negative"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("itemstat"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ITEMSTAT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_ITEMSTAT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_ITEMSTAT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("open ${brace"), "open ${brace");
        std::env::remove_var("_ITEMSTAT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_ITEMSTAT_SELF_REF", "${_ITEMSTAT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("out/${_ITEMSTAT_SELF_REF}/x"),
            "out/${_ITEMSTAT_SELF_REF}/x"
        );
        std::env::remove_var("_ITEMSTAT_SELF_REF");
        assert_eq!(resolve_env_vars("${_ITEMSTAT_UNSET_VAR}-a"), "-a");
    }

    #[test]
    fn default_config() {
        let config = ItemstatConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./itemstat-results"));
        assert_eq!(config.default_format, "table");
        assert_eq!(config.compare_threshold, 0.05);
        assert!(config.alpha_if_deleted);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
output_dir = "reports"
default_format = "json,html"
compare_threshold = 0.1
alpha_if_deleted = false

[bands.reliability]
excellent = 0.92

[bands.discrimination]
fair = 0.15
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.default_format, "json,html");
        assert!(!config.alpha_if_deleted);
        assert_eq!(config.bands.reliability.excellent, 0.92);
        assert_eq!(config.bands.reliability.good, 0.8);
        assert_eq!(config.bands.discrimination.fair, 0.15);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config_str("").unwrap(), ItemstatConfig::default());
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(parse_config_str("compare_threshold = -1.0").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("no/such/itemstat.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "default_format = \"html\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_format, "html");
    }
}
