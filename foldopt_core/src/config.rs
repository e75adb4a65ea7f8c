/// Configuration file support for foldopt
///
/// Holds adapter behaviour and per-node folding assignments decided outside the
/// adapters. Supports auto-detection of file format and multiple search paths.
use crate::core::FoldingFactors;
use crate::error::{FoldoptError, FoldoptResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What an adapter does when a folding parameter is absent on its node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingParameterPolicy {
    /// Skip the write without a trace
    #[default]
    Skip,
    /// Skip the write and emit a warning
    Warn,
    /// Fail the update
    Error,
}

/// Adapter behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(default)]
    pub missing_parameter: MissingParameterPolicy,
}

/// Folding assignment for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFoldingConfig {
    #[serde(default = "default_folding")]
    pub channel_in_folding: usize,

    #[serde(default = "default_folding")]
    pub channel_out_folding: usize,
}

fn default_folding() -> usize {
    1
}

impl NodeFoldingConfig {
    pub fn folding(&self) -> FoldingFactors {
        FoldingFactors::new(self.channel_in_folding, self.channel_out_folding)
    }
}

/// Full configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoldoptConfig {
    #[serde(default)]
    pub adapter: AdapterConfig,

    /// Map of node name -> folding assignment
    #[serde(default)]
    pub nodes: HashMap<String, NodeFoldingConfig>,
}

impl FoldoptConfig {
    /// Load config from a file (auto-detect format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> FoldoptResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FoldoptError::config(format!("Failed to read config file: {}", e)))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config = match extension {
            Some("toml") => Self::from_toml(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_toml(&contents).or_else(|_| Self::from_yaml(&contents)),
        }?;

        log::debug!(
            "Loaded foldopt config from {} ({} node entries)",
            path.display(),
            config.nodes.len()
        );
        Ok(config)
    }

    /// Parse config from TOML string
    pub fn from_toml(contents: &str) -> FoldoptResult<Self> {
        toml::from_str(contents)
            .map_err(|e| FoldoptError::config(format!("Failed to parse TOML: {}", e)))
    }

    /// Parse config from YAML string
    pub fn from_yaml(contents: &str) -> FoldoptResult<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| FoldoptError::config(format!("Failed to parse YAML: {}", e)))
    }

    /// Find and load config file from standard search paths
    ///
    /// Search order:
    /// 1. ./foldopt.toml, ./foldopt.yaml or ./foldopt.yml
    /// 2. ~/.foldopt/config.toml or ~/.foldopt/config.yaml
    /// 3. /etc/foldopt/config.toml or /etc/foldopt/config.yaml
    pub fn find_and_load() -> FoldoptResult<Self> {
        Self::load_first(&Self::get_search_paths())
    }

    /// Load the first existing file of `paths`
    pub fn load_first(paths: &[PathBuf]) -> FoldoptResult<Self> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path),
            None => Err(FoldoptError::config(
                "No config file found in standard locations",
            )),
        }
    }

    /// Get standard config file search paths
    pub fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("foldopt.toml"),
            PathBuf::from("foldopt.yaml"),
            PathBuf::from("foldopt.yml"),
        ];

        if let Some(home) = dirs::home_dir() {
            let user_dir = home.join(".foldopt");
            paths.push(user_dir.join("config.toml"));
            paths.push(user_dir.join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/foldopt/config.toml"));
        paths.push(PathBuf::from("/etc/foldopt/config.yaml"));
        paths
    }

    /// Get the folding assignment of a node by name
    pub fn node(&self, name: &str) -> FoldoptResult<&NodeFoldingConfig> {
        self.nodes
            .get(name)
            .ok_or_else(|| FoldoptError::config(format!("Node '{}' not found in config", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [adapter]
            missing_parameter = "warn"

            [nodes.MatrixVectorActivation_0]
            channel_in_folding = 4
            channel_out_folding = 2

            [nodes.Thresholding_0]
            channel_out_folding = 8
        "#;

        let config = FoldoptConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Warn);
        assert_eq!(config.nodes.len(), 2);

        let mvau = config.node("MatrixVectorActivation_0").unwrap();
        assert_eq!(mvau.folding(), FoldingFactors::new(4, 2));

        let thresholding = config.node("Thresholding_0").unwrap();
        assert_eq!(thresholding.channel_in_folding, 1);
        assert_eq!(thresholding.channel_out_folding, 8);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml_str = r#"
            adapter:
              missing_parameter: error
            nodes:
              ConvolutionInputGenerator_0:
                channel_in_folding: 3
        "#;

        let config = FoldoptConfig::from_yaml(yaml_str).unwrap();
        assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Error);
        let swg = config.node("ConvolutionInputGenerator_0").unwrap();
        assert_eq!(swg.folding(), FoldingFactors::new(3, 1));
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = FoldoptConfig::from_toml("").unwrap();
        assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Skip);
        assert!(config.nodes.is_empty());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = FoldoptConfig::from_toml("[adapter]\nmissing_parameter = \"ignore\"\n");
        assert!(matches!(result, Err(FoldoptError::Config(_))));
    }

    #[test]
    fn test_missing_node() {
        let config = FoldoptConfig::default();
        let err = config.node("nope").unwrap_err();
        assert!(err.to_string().contains("'nope' not found"));
    }

    #[test]
    fn test_search_paths_start_in_cwd() {
        let paths = FoldoptConfig::get_search_paths();
        assert_eq!(paths[0], PathBuf::from("foldopt.toml"));
        assert_eq!(
            paths.last().unwrap(),
            &PathBuf::from("/etc/foldopt/config.yaml")
        );
    }
}
