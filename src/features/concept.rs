use crate::{
    corpus::Sentence,
    stats::{CoOccurrence, CoOccurrenceSource},
    utils::math::LogBase,
};

/// Cohesion of one ordered bigram: `log(2 * p12 / (p1 * p2))`, 0 when undefined.
pub fn bigram_cohesion(co: CoOccurrence, base: LogBase) -> f64 {
    let denom = co.p1 * co.p2;
    if denom == 0.0 {
        return 0.0;
    }
    let wi = 2.0 * co.p12 / denom;
    if wi > 0.0 { base.log(wi) } else { 0.0 }
}

/// f4 before normalization: mean cohesion over the sentence's adjacent stem pairs.
///
/// `source` must describe the document that owns `sentence`.
/// Fewer than two words means no bigram and a score of 0.
pub fn concept_feature<S>(sentence: &Sentence, source: &S, base: LogBase) -> f64
where
    S: CoOccurrenceSource + ?Sized,
{
    let mut total = 0.0;
    let mut compounds = 0usize;
    for (prev, current) in sentence.bigrams() {
        total += bigram_cohesion(source.co_occurrence(prev, current), base);
        compounds += 1;
    }
    if compounds == 0 {
        return 0.0;
    }
    total / compounds as f64
}
