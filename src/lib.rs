//! This crate turns a DUC topic of annotated documents into a sentence feature
//! matrix for supervised extractive summarization.

pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod utils;

/// Corpus Model
/// All documents of one topic, held for the duration of a run.
///
/// Each `Document` keeps its sentences in source order; sentence 0 is the title
/// and is never scored. Every `Sentence` holds at least one `Word`.
pub use corpus::{Corpus, Document, Sentence, Word};

/// Reference summaries
/// `ReferenceSummary` is one model summary file, `ReferenceSet` the
/// case-insensitive lookup used to label rows.
pub use corpus::summary::{ReferenceSet, ReferenceSummary};

/// Corpus Statistics
/// idf per stem and per-document co-occurrence probabilities, built once over
/// an immutable corpus and shared by reference with every extractor.
///
/// `IdfSource` and `CoOccurrenceSource` are the seams between statistics and
/// extractors. A memoized table and a direct corpus scan implement each.
pub use stats::{CoOccurrence, CoOccurrenceIndex, CoOccurrenceSource, CorpusStats, IdfSource, IdfTable};

/// Feature extraction
/// - f1 `title_similarity`: title overlap
/// - f2 `positional_feature`: U-shaped body position
/// - f3 `term_weight`: tf * idf, folded by `TermWeightPolicy`
/// - f4 `concept_feature`: mean bigram cohesion, min-max normalized per run
pub use features::{
    concept_feature, positional_feature, term_weight, title_similarity, FeatureExtractor,
    FeatureMatrix, FeatureRow,
};

/// Run configuration and errors
pub use config::{FeatureConfig, TermWeightPolicy};
pub use error::{FeatureError, Result};
pub use utils::math::LogBase;
