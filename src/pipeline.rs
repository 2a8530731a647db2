//! Whole-topic entry points: directory in, matrix out.

use std::path::Path;

use tracing::info;

use crate::{
    config::FeatureConfig,
    corpus::{
        parser::{parse_dir, ParseOptions},
        summary::{describe_summaries, load_summaries, ReferenceSet, SummaryReport},
        Corpus,
    },
    error::Result,
    features::{FeatureExtractor, FeatureMatrix},
};

/// Where the reference summaries of a topic live.
#[derive(Debug, Clone)]
pub struct SummarySource<'a> {
    pub dir: &'a Path,
    /// case-insensitive file name prefix, e.g. the topic id
    pub prefix: &'a str,
}

/// Parse a topic directory with the stop-word setting of `config`.
pub fn load_topic<P: AsRef<Path>>(docs_dir: P, config: &FeatureConfig) -> Result<Corpus> {
    parse_dir(docs_dir, &ParseOptions::from(config))
}

/// Feature matrix of one topic, labeled when `summaries` is given.
pub fn run_topic<P: AsRef<Path>>(
    docs_dir: P,
    summaries: Option<SummarySource<'_>>,
    config: FeatureConfig,
) -> Result<FeatureMatrix> {
    let corpus = load_topic(docs_dir, &config)?;
    let references = match summaries {
        Some(src) => Some(ReferenceSet::new(&load_summaries(src.dir, src.prefix)?)),
        None => None,
    };
    let matrix = FeatureExtractor::new(&corpus, config).extract(references.as_ref())?;
    info!(rows = matrix.len(), width = matrix.width(), "feature matrix ready");
    Ok(matrix)
}

/// Text of every non-title sentence, in emission order.
pub fn inspect(corpus: &Corpus) -> Vec<&str> {
    corpus
        .body_sentences()
        .map(|(_, s)| s.text.as_str())
        .collect()
}

/// Align the summaries of `summaries` with the sentences of the topic.
pub fn describe<P: AsRef<Path>>(
    docs_dir: P,
    summaries: SummarySource<'_>,
    config: &FeatureConfig,
) -> Result<SummaryReport> {
    let corpus = load_topic(docs_dir, config)?;
    let summaries = load_summaries(summaries.dir, summaries.prefix)?;
    Ok(describe_summaries(&corpus, &summaries))
}
