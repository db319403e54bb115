use super::graph::Network;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MERGE_SEPARATOR: &str = "/";
pub const DEFAULT_FIRST_WEIGHT_KEY: &str = "weight1";
pub const DEFAULT_SECOND_WEIGHT_KEY: &str = "weight2";
pub const DEFAULT_SWAPS_PER_EDGE: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// How the node sets of two networks are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombinationType {
    #[default]
    Merge,
    Intersect,
}

/// How the weights of an edge present in both networks are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightMergePolicy {
    #[default]
    Average,
    Add,
    /// Keep both original weights as annotations instead of a numeric weight.
    AnnotateWithKeys,
}

/// Rules for [`Network::combine_with`].
///
/// Every field except the mapping network can be loaded from TOML:
///
/// ```toml
/// combination = "intersect"
/// weight-merge = "annotate-with-keys"
/// first-weight-key = "tap_score"
/// second-weight-key = "y2h_score"
/// merge-separator = "|"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CombinationRules {
    pub combination: CombinationType,
    pub weight_merge: WeightMergePolicy,
    pub first_weight_key: String,
    pub second_weight_key: String,
    pub merge_separator: String,
    /// Undirected bipartite network linking nodes of the first input to nodes of
    /// the second that should be merged into one node.
    #[serde(skip)]
    pub mapping: Option<Network>,
}

impl Default for CombinationRules {
    fn default() -> Self {
        Self {
            combination: CombinationType::default(),
            weight_merge: WeightMergePolicy::default(),
            first_weight_key: DEFAULT_FIRST_WEIGHT_KEY.to_string(),
            second_weight_key: DEFAULT_SECOND_WEIGHT_KEY.to_string(),
            merge_separator: DEFAULT_MERGE_SEPARATOR.to_string(),
            mapping: None,
        }
    }
}

impl CombinationRules {
    pub fn new(combination: CombinationType, weight_merge: WeightMergePolicy) -> Self {
        Self {
            combination,
            weight_merge,
            ..Self::default()
        }
    }

    pub fn builder() -> CombinationRulesBuilder {
        CombinationRulesBuilder::new()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let rules: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merge_separator.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "merge_separator",
                reason: "must not be empty".to_string(),
            });
        }
        if self.first_weight_key.is_empty() || self.second_weight_key.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "weight_keys",
                reason: "must not be empty".to_string(),
            });
        }
        if self.first_weight_key == self.second_weight_key {
            return Err(ConfigError::InvalidParameter {
                name: "weight_keys",
                reason: format!("both inputs map to '{}'", self.first_weight_key),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct CombinationRulesBuilder {
    combination: Option<CombinationType>,
    weight_merge: Option<WeightMergePolicy>,
    weight_keys: Option<(String, String)>,
    merge_separator: Option<String>,
    mapping: Option<Network>,
}

impl CombinationRulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combination(mut self, combination: CombinationType) -> Self {
        self.combination = Some(combination);
        self
    }
    pub fn weight_merge(mut self, policy: WeightMergePolicy) -> Self {
        self.weight_merge = Some(policy);
        self
    }
    pub fn weight_keys(mut self, first: &str, second: &str) -> Self {
        self.weight_keys = Some((first.to_string(), second.to_string()));
        self
    }
    pub fn merge_separator(mut self, separator: &str) -> Self {
        self.merge_separator = Some(separator.to_string());
        self
    }
    pub fn mapping(mut self, mapping: Network) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn build(self) -> Result<CombinationRules, ConfigError> {
        let defaults = CombinationRules::default();
        let (first_weight_key, second_weight_key) = self
            .weight_keys
            .unwrap_or((defaults.first_weight_key, defaults.second_weight_key));
        let rules = CombinationRules {
            combination: self.combination.unwrap_or(defaults.combination),
            weight_merge: self.weight_merge.unwrap_or(defaults.weight_merge),
            first_weight_key,
            second_weight_key,
            merge_separator: self.merge_separator.unwrap_or(defaults.merge_separator),
            mapping: self.mapping,
        };
        rules.validate()?;
        Ok(rules)
    }
}

/// Parameters of degree-preserving rewiring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RewiringConfig {
    /// Swaps per existing edge when no explicit swap count is requested.
    pub swaps_per_edge: usize,
    /// Optional bound on drawn candidate pairs. `None` keeps drawing until the
    /// target number of swaps has succeeded.
    pub max_attempts: Option<usize>,
}

impl Default for RewiringConfig {
    fn default() -> Self {
        Self {
            swaps_per_edge: DEFAULT_SWAPS_PER_EDGE,
            max_attempts: None,
        }
    }
}

impl RewiringConfig {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    mod combination_rules {
        use super::*;

        #[test]
        fn defaults_merge_and_average() {
            let rules = CombinationRules::default();
            assert_eq!(rules.combination, CombinationType::Merge);
            assert_eq!(rules.weight_merge, WeightMergePolicy::Average);
            assert_eq!(rules.merge_separator, DEFAULT_MERGE_SEPARATOR);
            assert!(rules.mapping.is_none());
        }

        #[test]
        fn builder_overrides_and_validates() {
            let rules = CombinationRules::builder()
                .combination(CombinationType::Intersect)
                .weight_merge(WeightMergePolicy::AnnotateWithKeys)
                .weight_keys("a", "b")
                .merge_separator("|")
                .build()
                .unwrap();
            assert_eq!(rules.combination, CombinationType::Intersect);
            assert_eq!(rules.first_weight_key, "a");
            assert_eq!(rules.second_weight_key, "b");
            assert_eq!(rules.merge_separator, "|");
        }

        #[test]
        fn builder_rejects_identical_weight_keys() {
            let result = CombinationRules::builder().weight_keys("w", "w").build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter { name: "weight_keys", .. })
            ));
        }

        #[test]
        fn builder_rejects_empty_separator() {
            let result = CombinationRules::builder().merge_separator("").build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter { name: "merge_separator", .. })
            ));
        }

        #[test]
        fn parses_kebab_case_toml() {
            let rules = CombinationRules::from_toml_str(
                r#"
                combination = "intersect"
                weight-merge = "annotate-with-keys"
                first-weight-key = "tap"
                second-weight-key = "y2h"
                "#,
            )
            .unwrap();
            assert_eq!(rules.combination, CombinationType::Intersect);
            assert_eq!(rules.weight_merge, WeightMergePolicy::AnnotateWithKeys);
            assert_eq!(rules.first_weight_key, "tap");
            assert_eq!(rules.merge_separator, DEFAULT_MERGE_SEPARATOR);
        }

        #[test]
        fn unknown_fields_are_rejected() {
            let result = CombinationRules::from_toml_str("colour = \"blue\"");
            assert!(matches!(result, Err(ConfigError::Toml { .. })));
        }

        #[test]
        fn load_reads_rules_from_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("rules.toml");
            let mut file = File::create(&path).unwrap();
            writeln!(file, "weight-merge = \"add\"").unwrap();

            let rules = CombinationRules::load(&path).unwrap();
            assert_eq!(rules.weight_merge, WeightMergePolicy::Add);
        }

        #[test]
        fn load_reports_missing_file() {
            let dir = tempdir().unwrap();
            let result = CombinationRules::load(&dir.path().join("absent.toml"));
            assert!(matches!(result, Err(ConfigError::Io { .. })));
        }
    }

    mod rewiring_config {
        use super::*;

        #[test]
        fn defaults_to_ten_swaps_per_edge_without_bound() {
            let config = RewiringConfig::default();
            assert_eq!(config.swaps_per_edge, 10);
            assert_eq!(config.max_attempts, None);
        }

        #[test]
        fn parses_from_toml() {
            let config = RewiringConfig::from_toml_str("swaps-per-edge = 3\nmax-attempts = 500").unwrap();
            assert_eq!(config.swaps_per_edge, 3);
            assert_eq!(config.max_attempts, Some(500));
        }
    }
}
