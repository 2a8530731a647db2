//! Run configuration.

use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::utils::math::LogBase;

/// How per-word `tf * idf` products collapse into one sentence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermWeightPolicy {
    /// Highest product in the sentence.
    #[default]
    Max,
    Sum,
    Mean,
}

impl FromStr for TermWeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(TermWeightPolicy::Max),
            "sum" => Ok(TermWeightPolicy::Sum),
            "mean" | "avg" => Ok(TermWeightPolicy::Mean),
            other => Err(format!("unknown term weight policy: {other}")),
        }
    }
}

impl fmt::Display for TermWeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TermWeightPolicy::Max => "max",
            TermWeightPolicy::Sum => "sum",
            TermWeightPolicy::Mean => "mean",
        };
        f.write_str(s)
    }
}

/// Feature extraction settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Base of the idf logarithm.
    pub idf_log: LogBase,
    /// Base of the bigram cohesion logarithm.
    pub cohesion_log: LogBase,
    /// Aggregation of word weights into f3.
    pub term_weight: TermWeightPolicy,
    /// Keep only words flagged as non-stop when parsing.
    pub remove_stop_words: bool,
    /// Compute sentence features on the rayon pool.
    pub parallel: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            idf_log: LogBase::Natural,
            cohesion_log: LogBase::Base2,
            term_weight: TermWeightPolicy::Max,
            remove_stop_words: true,
            parallel: true,
        }
    }
}

impl FeatureConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// Optional:
    /// - `DUC_IDF_LOG`: natural | base2 | base10
    /// - `DUC_COHESION_LOG`: natural | base2 | base10
    /// - `DUC_TERM_WEIGHT`: max | sum | mean
    /// - `DUC_KEEP_STOP_WORDS`: true | false
    /// - `DUC_PARALLEL`: true | false
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = read_var("DUC_IDF_LOG")? {
            config.idf_log = v;
        }
        if let Some(v) = read_var("DUC_COHESION_LOG")? {
            config.cohesion_log = v;
        }
        if let Some(v) = read_var("DUC_TERM_WEIGHT")? {
            config.term_weight = v;
        }
        if let Some(keep) = read_var::<bool>("DUC_KEEP_STOP_WORDS")? {
            config.remove_stop_words = !keep;
        }
        if let Some(v) = read_var("DUC_PARALLEL")? {
            config.parallel = v;
        }
        Ok(config)
    }
}

fn read_var<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
