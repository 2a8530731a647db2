use duc_features::{
    positional_feature, title_similarity, Corpus, Document, IdfSource, IdfTable, LogBase,
    Sentence, Word,
};
use proptest::prelude::*;

fn sentence_of(id: i64, stems: &[String]) -> Sentence {
    let words = stems.iter().map(|s| Word::new(s, s, 1.0)).collect();
    Sentence::new(id, stems.join(" "), words)
}

proptest! {
    #[test]
    fn positional_in_unit_range_and_symmetric(n in 1usize..200, seed in 0usize..10_000) {
        let pos = seed % n + 1;
        let v = positional_feature(pos, n);
        prop_assert!((0.0..=1.0).contains(&v));
        prop_assert!((v - positional_feature(n + 1 - pos, n)).abs() < 1e-12);
        if n == 1 {
            prop_assert_eq!(v, 1.0);
        }
    }

    #[test]
    fn title_similarity_in_unit_range(
        title in prop::collection::vec("[a-d]{1,2}", 1..6),
        body in prop::collection::vec("[a-f]{1,2}", 1..10),
    ) {
        let v = title_similarity(&sentence_of(0, &title), &sentence_of(1, &body));
        prop_assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn title_similarity_extremes(title in prop::collection::vec("[a-z]{3}", 1..6)) {
        let t = sentence_of(0, &title);
        prop_assert_eq!(title_similarity(&t, &sentence_of(1, &title)), 1.0);
        let disjoint: Vec<String> = title.iter().map(|s| format!("{s}9")).collect();
        prop_assert_eq!(title_similarity(&t, &sentence_of(1, &disjoint)), 0.0);
    }

    #[test]
    fn idf_non_increasing_in_document_frequency(docs in 2usize..12) {
        // stem "k{i}" occurs in the first i documents
        let documents = (0..docs)
            .map(|d| {
                let stems: Vec<String> = (1..=docs).filter(|i| d < *i).map(|i| format!("k{i}")).collect();
                Document::new(format!("d{d}"), vec![sentence_of(0, &stems)]).unwrap()
            })
            .collect();
        let table = IdfTable::build(&Corpus::new(documents), LogBase::Natural);
        let values: Vec<f64> = (1..=docs).map(|i| table.idf(&format!("k{i}")).unwrap()).collect();
        for w in values.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        prop_assert_eq!(values[docs - 1], 0.0);
    }
}
