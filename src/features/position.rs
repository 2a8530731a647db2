/// f2: U-shaped position score of the `pos`-th (1-based) of `doc_len` body sentences.
///
/// 1 at both ends of the body, 0 at the middle rank, and 1 when the body
/// holds a single sentence.
pub fn positional_feature(pos: usize, doc_len: usize) -> f64 {
    if doc_len == 0 {
        return 0.0;
    }
    if doc_len == 1 {
        return 1.0;
    }
    let pos = pos as f64;
    let mean = (doc_len as f64 + 1.0) / 2.0;
    if pos <= mean {
        (mean - pos) / (mean - 1.0)
    } else {
        (pos - mean) / (mean - 1.0)
    }
}
