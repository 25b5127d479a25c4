/// Cosine similarity between two feature vectors.
///
/// Vectors of different length, and vectors with a zero norm, score `0.0`
/// rather than failing. The result is clamped to `[-1, 1]`.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // sqrt(|a|² · |b|²) keeps cosine(a, a) at exactly 1.0
    let denom = (norm_a * norm_b).sqrt();
    (dot / denom).clamp(-1.0, 1.0)
}
