use crate::{config::TermWeightPolicy, corpus::Sentence, error::Result, stats::IdfSource};

/// f3: per-word `tf * idf` folded by `policy`.
///
/// `Max` keeps the single most discriminative word of the sentence.
/// An empty sentence scores 0.
pub fn term_weight<S>(sentence: &Sentence, idf: &S, policy: TermWeightPolicy) -> Result<f64>
where
    S: IdfSource + ?Sized,
{
    let mut max = 0.0_f64;
    let mut sum = 0.0_f64;
    for word in &sentence.words {
        let weight = word.term_frequency * idf.idf(&word.stem)?;
        if weight > max {
            max = weight;
        }
        sum += weight;
    }
    Ok(match policy {
        TermWeightPolicy::Max => max,
        TermWeightPolicy::Sum => sum,
        TermWeightPolicy::Mean if sentence.is_empty() => 0.0,
        TermWeightPolicy::Mean => sum / sentence.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        corpus::{test_util::document, Corpus, Sentence, Word},
        error::FeatureError,
        stats::{CorpusScan, IdfTable},
        utils::math::LogBase,
    };

    /// idf fixed per stem
    struct FixedIdf(Vec<(&'static str, f64)>);

    impl IdfSource for FixedIdf {
        fn idf(&self, stem: &str) -> Result<f64> {
            self.0
                .iter()
                .find(|(s, _)| *s == stem)
                .map(|(_, v)| *v)
                .ok_or_else(|| FeatureError::ZeroDocumentFrequency { stem: stem.to_string() })
        }
    }

    #[test]
    fn single_word_is_tf_times_idf() {
        let s = Sentence::new(1, "storm", vec![Word::new("storm", "storm", 2.0)]);
        let idf = FixedIdf(vec![("storm", 0.5)]);
        assert_eq!(term_weight(&s, &idf, TermWeightPolicy::Max).unwrap(), 1.0);
    }

    #[test]
    fn policies() {
        let s = Sentence::new(
            1,
            "a b c",
            vec![
                Word::new("a", "a", 1.0),
                Word::new("b", "b", 2.0),
                Word::new("c", "c", 3.0),
            ],
        );
        let idf = FixedIdf(vec![("a", 1.0), ("b", 2.0), ("c", 0.5)]);
        // 1.0, 4.0, 1.5
        assert_eq!(term_weight(&s, &idf, TermWeightPolicy::Max).unwrap(), 4.0);
        assert_eq!(term_weight(&s, &idf, TermWeightPolicy::Sum).unwrap(), 6.5);
        assert!((term_weight(&s, &idf, TermWeightPolicy::Mean).unwrap() - 6.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_stem_propagates() {
        let s = Sentence::new(1, "x", vec![Word::new("x", "x", 1.0)]);
        let idf = FixedIdf(Vec::new());
        assert!(term_weight(&s, &idf, TermWeightPolicy::Max).is_err());
    }

    #[test]
    fn table_and_scan_agree_on_corpus_sentences() {
        let corpus = Corpus::new(vec![
            document("a", &["storm", "storm coast", "rain"]),
            document("b", &["wind", "coast wind"]),
        ]);
        let table = IdfTable::build(&corpus, LogBase::Natural);
        let scan = CorpusScan { corpus: &corpus, base: LogBase::Natural };
        for (_, s) in corpus.body_sentences() {
            assert_eq!(
                term_weight(s, &table, TermWeightPolicy::Max).unwrap(),
                term_weight(s, &scan, TermWeightPolicy::Max).unwrap()
            );
        }
    }
}
