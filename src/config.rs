//! Configuration management for the talent matcher

use crate::error::{Result, TalentMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bounds of the similarity weight range accepted by the scorer.
pub const MIN_SIMILARITY_WEIGHT: f64 = 0.1;
pub const MAX_SIMILARITY_WEIGHT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub similarity: SimilarityConfig,
    pub segmentation: SegmentationConfig,
    pub profile: ProfileConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: CategoryWeights,
    pub tech_keywords: Vec<String>,
    pub default_top_n: usize,
}

/// Per-category weights of the keyword match scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub skills: f64,
    pub activities: f64,
    pub education: f64,
    pub training: f64,
}

/// Per-category weights of the profile similarity scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    pub skills: f64,
    pub education: f64,
    pub training: f64,
    pub activity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    pub policy: SegmentationPolicy,
    pub fragment_separator: String,
}

/// Where a line that matches no section rule is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationPolicy {
    /// Every unmatched line goes to the unclassified bucket.
    Strict,
    /// Unmatched lines join the active section once one has been seen.
    CarryForward,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub id_strategy: IdStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdStrategy {
    /// Uniform draw from an inclusive range; uniqueness is not checked.
    Random { min: u32, max: u32 },
    /// Monotonic counter.
    Sequential { start: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            skills: 3.0,
            activities: 2.0,
            education: 1.0,
            training: 1.0,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            skills: 1.0,
            education: 1.0,
            training: 1.0,
            activity: 1.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                weights: CategoryWeights::default(),
                tech_keywords: ["python", "java", "c++", "sql", "machine learning", "django"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                default_top_n: 5,
            },
            similarity: SimilarityConfig::default(),
            segmentation: SegmentationConfig {
                policy: SegmentationPolicy::Strict,
                fragment_separator: ". ".to_string(),
            },
            profile: ProfileConfig {
                id_strategy: IdStrategy::Random { min: 700, max: 900 },
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| TalentMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TalentMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("talent-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.matching.weights;
        for (name, value) in [
            ("matching.weights.skills", w.skills),
            ("matching.weights.activities", w.activities),
            ("matching.weights.education", w.education),
            ("matching.weights.training", w.training),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TalentMatcherError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        self.similarity.validate()?;

        if self.matching.default_top_n == 0 {
            return Err(TalentMatcherError::Configuration(
                "matching.default_top_n must be at least 1".to_string(),
            ));
        }

        if let IdStrategy::Random { min, max } = self.profile.id_strategy {
            if min > max {
                return Err(TalentMatcherError::Configuration(format!(
                    "profile.id_strategy range is empty: {}..={}",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Apply a `section.key = value` override, as used by `config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_f64 = |v: &str| -> Result<f64> {
            v.parse::<f64>()
                .map_err(|_| TalentMatcherError::Configuration(format!("'{}' is not a number", v)))
        };
        let parse_bool = |v: &str| -> Result<bool> {
            v.parse::<bool>()
                .map_err(|_| TalentMatcherError::Configuration(format!("'{}' is not a boolean", v)))
        };

        let previous = self.clone();
        match key {
            "matching.weights.skills" => self.matching.weights.skills = parse_f64(value)?,
            "matching.weights.activities" => self.matching.weights.activities = parse_f64(value)?,
            "matching.weights.education" => self.matching.weights.education = parse_f64(value)?,
            "matching.weights.training" => self.matching.weights.training = parse_f64(value)?,
            "matching.default_top_n" => {
                self.matching.default_top_n = value
                    .parse()
                    .map_err(|_| TalentMatcherError::Configuration(format!("'{}' is not a count", value)))?
            }
            "similarity.skills" => self.similarity.skills = parse_f64(value)?,
            "similarity.education" => self.similarity.education = parse_f64(value)?,
            "similarity.training" => self.similarity.training = parse_f64(value)?,
            "similarity.activity" => self.similarity.activity = parse_f64(value)?,
            "segmentation.policy" => {
                self.segmentation.policy = match value {
                    "strict" => SegmentationPolicy::Strict,
                    "carry_forward" | "carry-forward" => SegmentationPolicy::CarryForward,
                    other => {
                        return Err(TalentMatcherError::Configuration(format!(
                            "Unknown segmentation policy: {}",
                            other
                        )))
                    }
                }
            }
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value).map_err(TalentMatcherError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse_bool(value)?,
            "output.color_output" => self.output.color_output = parse_bool(value)?,
            other => {
                return Err(TalentMatcherError::Configuration(format!(
                    "Unknown configuration key: {}",
                    other
                )))
            }
        }

        if let Err(e) = self.validate() {
            *self = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl SimilarityConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("skills", self.skills),
            ("education", self.education),
            ("training", self.training),
            ("activity", self.activity),
        ] {
            if !value.is_finite() || !(MIN_SIMILARITY_WEIGHT..=MAX_SIMILARITY_WEIGHT).contains(&value) {
                return Err(TalentMatcherError::Configuration(format!(
                    "similarity weight '{}' must be between {} and {}, got {}",
                    name, MIN_SIMILARITY_WEIGHT, MAX_SIMILARITY_WEIGHT, value
                )));
            }
        }
        Ok(())
    }
}
