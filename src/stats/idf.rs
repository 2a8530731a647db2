use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
    corpus::{fold_stem, Corpus, Document},
    error::{FeatureError, Result},
    utils::math::LogBase,
};

/// Anything that can answer `idf(stem)` for one topic.
pub trait IdfSource {
    /// Fails with `ZeroDocumentFrequency` for a stem no document contains.
    fn idf(&self, stem: &str) -> Result<f64>;
}

/// keep document count and per-stem document counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFrequency {
    /// number of documents added
    pub doc_num: u64,
    /// stem -> number of documents containing it
    #[serde(with = "indexmap::map::serde_seq")]
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every stem appearing anywhere in the corpus.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut df = Self::new();
        for doc in &corpus.documents {
            df.add_document(doc);
        }
        df
    }

    /// Add one document's distinct stems.
    pub fn add_document(&mut self, doc: &Document) {
        let stems: IndexSet<_> = doc
            .sentences()
            .iter()
            .flat_map(|s| s.stems())
            .map(fold_stem)
            .collect();
        self.add_set(&stems.into_iter().collect::<Vec<_>>());
    }

    /// Add a document given as a set of terms. Each term must appear once.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(term.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Get the document count of a stem, 0 if unseen
    #[inline]
    pub fn get_term_count(&self, stem: &str) -> u64 {
        self.term_counts.get(&*fold_stem(stem)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }
}

/// `log(N / df)` in the given base.
#[inline]
pub fn idf_value(doc_num: u64, doc_freq: u64, base: LogBase) -> f64 {
    base.log(doc_num as f64 / doc_freq as f64)
}

/// idf of every stem in the topic, computed once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdfTable {
    pub base: LogBase,
    pub doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    idf: IndexMap<Box<str>, f64>,
}

impl IdfTable {
    pub fn build(corpus: &Corpus, base: LogBase) -> Self {
        Self::from_document_frequency(&DocumentFrequency::from_corpus(corpus), base)
    }

    pub fn from_document_frequency(df: &DocumentFrequency, base: LogBase) -> Self {
        let idf = df
            .term_counts
            .iter()
            .map(|(stem, &count)| (stem.clone(), idf_value(df.doc_num, count, base)))
            .collect();
        Self {
            base,
            doc_num: df.doc_num,
            idf,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.idf.iter().map(|(k, v)| (&**k, *v))
    }
}

impl IdfSource for IdfTable {
    fn idf(&self, stem: &str) -> Result<f64> {
        self.idf
            .get(&*fold_stem(stem))
            .copied()
            .ok_or_else(|| FeatureError::ZeroDocumentFrequency {
                stem: stem.to_string(),
            })
    }
}

/// Direct scan over the corpus for every call, no table.
#[derive(Debug, Clone, Copy)]
pub struct CorpusScan<'a> {
    pub corpus: &'a Corpus,
    pub base: LogBase,
}

impl IdfSource for CorpusScan<'_> {
    fn idf(&self, stem: &str) -> Result<f64> {
        let doc_freq = self
            .corpus
            .documents
            .iter()
            .filter(|d| d.contains_stem(stem))
            .count() as u64;
        if doc_freq == 0 {
            return Err(FeatureError::ZeroDocumentFrequency {
                stem: stem.to_string(),
            });
        }
        Ok(idf_value(self.corpus.doc_num() as u64, doc_freq, self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_util::document;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            document("d1", &["storm warning", "storm coast storm", "rain"]),
            document("d2", &["Storm track", "wind"]),
            document("d3", &["flood", "rain wind"]),
            document("d4", &["quake", "damage"]),
        ])
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let df = DocumentFrequency::from_corpus(&corpus());
        assert_eq!(df.doc_num, 4);
        assert_eq!(df.get_term_count("storm"), 2);
        assert_eq!(df.get_term_count("STORM"), 2);
        assert_eq!(df.get_term_count("rain"), 2);
        assert_eq!(df.get_term_count("quake"), 1);
        assert_eq!(df.get_term_count("missing"), 0);
    }

    #[test]
    fn idf_is_log_of_inverse_share() {
        let table = IdfTable::build(&corpus(), LogBase::Natural);
        assert!((table.idf("storm").unwrap() - 2.0_f64.ln()).abs() < 1e-12);
        assert!((table.idf("quake").unwrap() - 4.0_f64.ln()).abs() < 1e-12);

        let table10 = IdfTable::build(&corpus(), LogBase::Base10);
        assert!((table10.idf("quake").unwrap() - 4.0_f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn idf_is_zero_for_stem_in_every_document() {
        let corpus = Corpus::new(vec![
            document("a", &["x", "common y"]),
            document("b", &["common", "z"]),
        ]);
        let table = IdfTable::build(&corpus, LogBase::Natural);
        assert_eq!(table.idf("common").unwrap(), 0.0);
    }

    #[test]
    fn unknown_stem_is_an_error() {
        let table = IdfTable::build(&corpus(), LogBase::Natural);
        let err = table.idf("volcano").unwrap_err();
        assert!(matches!(err, FeatureError::ZeroDocumentFrequency { ref stem } if stem == "volcano"));

        let corpus = corpus();
        let scan = CorpusScan { corpus: &corpus, base: LogBase::Natural };
        assert!(scan.idf("volcano").is_err());
    }

    #[test]
    fn table_matches_direct_scan() {
        let corpus = corpus();
        let table = IdfTable::build(&corpus, LogBase::Natural);
        let scan = CorpusScan { corpus: &corpus, base: LogBase::Natural };
        assert_eq!(table.len(), 9);
        for (stem, value) in table.iter() {
            assert!((scan.idf(stem).unwrap() - value).abs() < 1e-12, "stem {stem}");
        }
    }
}
