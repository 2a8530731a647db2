//! Topic-wide statistics, computed once per run over an immutable corpus.

pub mod cooccurrence;
pub mod idf;

use rayon::prelude::*;
use tracing::info;

use crate::{corpus::Corpus, utils::math::LogBase};

pub use cooccurrence::{co_occurrence_probability, CoOccurrence, CoOccurrenceIndex, CoOccurrenceSource};
pub use idf::{CorpusScan, DocumentFrequency, IdfSource, IdfTable};

/// Read-only statistics shared by every extractor of one run.
///
/// `cooccurrence[i]` belongs to `corpus.documents[i]`.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    pub idf: IdfTable,
    pub cooccurrence: Vec<CoOccurrenceIndex>,
}

impl CorpusStats {
    pub fn build(corpus: &Corpus, idf_log: LogBase, parallel: bool) -> Self {
        let idf = IdfTable::build(corpus, idf_log);
        let cooccurrence = if parallel {
            corpus.documents.par_iter().map(CoOccurrenceIndex::build).collect()
        } else {
            corpus.documents.iter().map(CoOccurrenceIndex::build).collect()
        };
        info!(
            documents = corpus.doc_num(),
            vocab = idf.len(),
            "built corpus statistics"
        );
        Self { idf, cooccurrence }
    }

    /// Co-occurrence index of the `doc_index`-th document.
    #[inline]
    pub fn document(&self, doc_index: usize) -> &CoOccurrenceIndex {
        &self.cooccurrence[doc_index]
    }
}
