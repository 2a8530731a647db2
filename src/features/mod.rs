//! Per-sentence features and the matrix built from them.

pub mod concept;
pub mod matrix;
pub mod position;
pub mod term_weight;
pub mod title;

pub use concept::{bigram_cohesion, concept_feature};
pub use matrix::{FeatureExtractor, FeatureMatrix, FeatureRow, FEATURE_NUM};
pub use position::positional_feature;
pub use term_weight::term_weight;
pub use title::title_similarity;
