use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::FeatureConfig,
    corpus::{summary::ReferenceSet, Corpus, Sentence},
    error::Result,
    features::{concept_feature, positional_feature, term_weight, title_similarity},
    stats::CorpusStats,
    utils::scaler::{min_max_scale, MinMax},
};

/// title, position, term weight, concept
pub const FEATURE_NUM: usize = 4;
const CONCEPT: usize = 3;

/// Features of one non-title sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// index into `Corpus::documents`
    pub document: usize,
    /// `Sentence::id` of the source sentence
    pub sentence: i64,
    pub features: [f64; FEATURE_NUM],
    /// 1.0 when the sentence appears in a reference summary
    pub label: Option<f64>,
}

impl FeatureRow {
    /// features followed by the label, if any
    pub fn values(&self) -> Vec<f64> {
        let mut v = self.features.to_vec();
        v.extend(self.label);
        v
    }

    /// `index` of `values()` without building it
    #[inline]
    pub fn value(&self, index: usize) -> Option<f64> {
        match index {
            i if i < FEATURE_NUM => Some(self.features[i]),
            FEATURE_NUM => self.label,
            _ => None,
        }
    }
}

/// Rows in (document order, sentence order).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub rows: Vec<FeatureRow>,
    pub labeled: bool,
}

impl FeatureMatrix {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 4 or 5
    #[inline]
    pub fn width(&self) -> usize {
        FEATURE_NUM + self.labeled as usize
    }

    /// One column over every row; `None` past `width()`.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.width() {
            return None;
        }
        self.rows.iter().map(|r| r.value(index)).collect()
    }

    /// Rescale the concept column to `[0, 1]` over every row of the run.
    fn normalize_concept(&mut self) -> Option<MinMax<f64>> {
        let mut column: Vec<f64> = self.rows.iter().map(|r| r.features[CONCEPT]).collect();
        let range = min_max_scale(&mut column)?;
        for (row, value) in self.rows.iter_mut().zip(column) {
            row.features[CONCEPT] = value;
        }
        if range.is_degenerate() {
            warn!(value = range.min, "concept feature is constant over the run, set to 0");
        }
        Some(range)
    }
}

/// Builds feature rows over a topic.
///
/// Statistics are computed once in `new` and shared by every sentence.
#[derive(Debug)]
pub struct FeatureExtractor<'a> {
    corpus: &'a Corpus,
    stats: CorpusStats,
    config: FeatureConfig,
}

/// one body sentence waiting for its features
struct Slot<'a> {
    document: usize,
    rank: usize,
    body_len: usize,
    sentence: &'a Sentence,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(corpus: &'a Corpus, config: FeatureConfig) -> Self {
        let stats = CorpusStats::build(corpus, config.idf_log, config.parallel);
        Self {
            corpus,
            stats,
            config,
        }
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Compute the matrix. With `references`, every row gets a 0/1 label.
    pub fn extract(&self, references: Option<&ReferenceSet>) -> Result<FeatureMatrix> {
        let slots = self.slots();
        info!(
            sentences = slots.len(),
            labeled = references.is_some(),
            parallel = self.config.parallel,
            "extracting sentence features"
        );

        let compute = |slot: &Slot<'_>| self.row(slot, references);
        let rows = if self.config.parallel {
            slots.par_iter().map(compute).collect::<Result<Vec<_>>>()?
        } else {
            slots.iter().map(compute).collect::<Result<Vec<_>>>()?
        };

        // 全行が揃ってから正規化
        let mut matrix = FeatureMatrix {
            rows,
            labeled: references.is_some(),
        };
        if let Some(range) = matrix.normalize_concept() {
            debug!(min = range.min, max = range.max, "concept range");
        }
        Ok(matrix)
    }

    fn slots(&self) -> Vec<Slot<'a>> {
        let mut slots = Vec::with_capacity(self.corpus.body_sentence_num());
        for (document, doc) in self.corpus.documents.iter().enumerate() {
            let body = doc.body();
            for (i, sentence) in body.iter().enumerate() {
                slots.push(Slot {
                    document,
                    rank: i + 1,
                    body_len: body.len(),
                    sentence,
                });
            }
        }
        slots
    }

    fn row(&self, slot: &Slot<'_>, references: Option<&ReferenceSet>) -> Result<FeatureRow> {
        let doc = &self.corpus.documents[slot.document];
        let s = slot.sentence;
        let features = [
            title_similarity(doc.title(), s),
            positional_feature(slot.rank, slot.body_len),
            term_weight(s, &self.stats.idf, self.config.term_weight)?,
            concept_feature(s, self.stats.document(slot.document), self.config.cohesion_log),
        ];
        Ok(FeatureRow {
            document: slot.document,
            sentence: s.id,
            features,
            label: references.map(|r| r.label(&s.text)),
        })
    }
}
