use indexmap::IndexSet;

use crate::{
    corpus::{fold_stem, Sentence},
    utils::math::ratio_or_zero,
};

/// f1: share of the candidate's words whose stem also appears in the title.
///
/// Each candidate word counts at most once, however many title words it matches.
pub fn title_similarity(title: &Sentence, sentence: &Sentence) -> f64 {
    let title_stems: IndexSet<_> = title.stems().map(fold_stem).collect();
    let similar = sentence
        .stems()
        .filter(|stem| title_stems.contains(&*fold_stem(stem)))
        .count();
    ratio_or_zero(similar, sentence.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_util::sentence;

    #[test]
    fn full_overlap_is_one() {
        let title = sentence(0, "hurricane gilbert jamaica");
        assert_eq!(title_similarity(&title, &sentence(1, "Gilbert hurricane")), 1.0);
    }

    #[test]
    fn no_overlap_is_zero() {
        let title = sentence(0, "hurricane gilbert");
        assert_eq!(title_similarity(&title, &sentence(1, "rain fell")), 0.0);
    }

    #[test]
    fn repeated_title_stem_counts_once_per_candidate_word() {
        let title = sentence(0, "storm storm coast");
        let s = sentence(1, "storm wind storm rain");
        assert_eq!(title_similarity(&title, &s), 0.5);
    }

    #[test]
    fn empty_candidate_is_zero() {
        let title = sentence(0, "storm");
        assert_eq!(title_similarity(&title, &Sentence::new(1, "", Vec::new())), 0.0);
    }
}
