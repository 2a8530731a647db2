//! Sentence-window co-occurrence of stem pairs inside one document.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
    corpus::{fold_stem, Document},
    utils::math::ratio_or_zero,
};

/// `(P(term1), P(term2), P(term1 term2))` over the sentences of a document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub p1: f64,
    pub p2: f64,
    /// adjacent, in this order
    pub p12: f64,
}

/// Source of co-occurrence probabilities for one document.
pub trait CoOccurrenceSource {
    fn co_occurrence(&self, term1: &str, term2: &str) -> CoOccurrence;
}

/// Scans every sentence of the document on each call.
impl CoOccurrenceSource for Document {
    fn co_occurrence(&self, term1: &str, term2: &str) -> CoOccurrence {
        co_occurrence_probability(term1, term2, self)
    }
}

/// Presence counts are per sentence: a stem seen twice in a sentence counts once.
/// The compound is the ordered pair on adjacent words of the same sentence.
pub fn co_occurrence_probability(term1: &str, term2: &str, doc: &Document) -> CoOccurrence {
    let term1 = fold_stem(term1);
    let term2 = fold_stem(term2);
    let (mut n1, mut n2, mut n12) = (0usize, 0usize, 0usize);
    for sentence in doc.sentences() {
        let mut found1 = false;
        let mut found2 = false;
        let mut found12 = false;
        let mut prev: Option<std::borrow::Cow<'_, str>> = None;
        for stem in sentence.stems().map(fold_stem) {
            found1 |= stem == term1;
            found2 |= stem == term2;
            if let Some(p) = &prev {
                found12 |= *p == term1 && stem == term2;
            }
            prev = Some(stem);
        }
        n1 += found1 as usize;
        n2 += found2 as usize;
        n12 += found12 as usize;
    }
    let total = doc.sentences().len();
    CoOccurrence {
        p1: ratio_or_zero(n1, total),
        p2: ratio_or_zero(n2, total),
        p12: ratio_or_zero(n12, total),
    }
}

/// Per-sentence presence counts of a document, built once and queried per bigram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoOccurrenceIndex {
    pub sentence_num: usize,
    /// stem -> sentences containing it
    #[serde(with = "indexmap::map::serde_seq")]
    stem_counts: IndexMap<Box<str>, usize>,
    /// prev -> current -> sentences containing the adjacent pair
    bigram_counts: IndexMap<Box<str>, IndexMap<Box<str>, usize>>,
}

impl CoOccurrenceIndex {
    pub fn build(doc: &Document) -> Self {
        let mut index = Self {
            sentence_num: doc.sentences().len(),
            ..Self::default()
        };
        for sentence in doc.sentences() {
            let stems: Vec<_> = sentence.stems().map(fold_stem).collect();
            let present: IndexSet<&str> = stems.iter().map(|s| &**s).collect();
            for stem in present {
                *index.stem_counts.entry(stem.into()).or_insert(0) += 1;
            }
            let pairs: IndexSet<(&str, &str)> = stems
                .windows(2)
                .map(|w| (&*w[0], &*w[1]))
                .collect();
            for (prev, current) in pairs {
                *index
                    .bigram_counts
                    .entry(prev.into())
                    .or_default()
                    .entry(current.into())
                    .or_insert(0) += 1;
            }
        }
        index
    }

    #[inline]
    pub fn stem_count(&self, stem: &str) -> usize {
        self.stem_counts.get(&*fold_stem(stem)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn bigram_count(&self, prev: &str, current: &str) -> usize {
        self.bigram_counts
            .get(&*fold_stem(prev))
            .and_then(|m| m.get(&*fold_stem(current)))
            .copied()
            .unwrap_or(0)
    }
}

impl CoOccurrenceSource for CoOccurrenceIndex {
    fn co_occurrence(&self, term1: &str, term2: &str) -> CoOccurrence {
        CoOccurrence {
            p1: ratio_or_zero(self.stem_count(term1), self.sentence_num),
            p2: ratio_or_zero(self.stem_count(term2), self.sentence_num),
            p12: ratio_or_zero(self.bigram_count(term1, term2), self.sentence_num),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_util::document;

    fn doc() -> Document {
        document(
            "d",
            &[
                "storm warning",         // title counts as a window too
                "storm warning storm",
                "warning storm",
                "storm",
            ],
        )
    }

    #[test]
    fn probabilities_over_sentences() {
        let co = co_occurrence_probability("storm", "warning", &doc());
        assert_eq!(co.p1, 1.0);
        assert_eq!(co.p2, 0.75);
        assert_eq!(co.p12, 0.5);
    }

    #[test]
    fn compound_is_ordered() {
        let co = co_occurrence_probability("warning", "storm", &doc());
        assert_eq!(co.p12, 0.5);
        let co = co_occurrence_probability("storm", "storm", &doc());
        assert_eq!(co.p1, 1.0);
        assert_eq!(co.p2, 1.0);
        assert_eq!(co.p12, 0.0);
    }

    #[test]
    fn adjacency_does_not_cross_sentences() {
        let d = document("d", &["t", "alpha", "beta"]);
        let co = co_occurrence_probability("alpha", "beta", &d);
        assert!((co.p1 - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(co.p12, 0.0);
    }

    #[test]
    fn case_is_ignored() {
        let co = co_occurrence_probability("STORM", "Warning", &doc());
        assert_eq!(co.p12, 0.5);
    }

    #[test]
    fn index_matches_scan() {
        let d = document(
            "d",
            &["Storm hits coast", "storm hits", "coast storm hits coast", "calm"],
        );
        let index = CoOccurrenceIndex::build(&d);
        for t1 in ["storm", "hits", "coast", "calm", "absent"] {
            for t2 in ["storm", "hits", "coast", "calm", "absent"] {
                assert_eq!(index.co_occurrence(t1, t2), d.co_occurrence(t1, t2), "{t1} {t2}");
            }
        }
    }
}
