// Pairwise cosine similarity between posts' content-derived features.
//
// Used to spot accounts that post the same kind of thing over and over:
// templated bot output has near-identical content vectors even when the
// wording changes.

use super::stats::Summary;

/// Sentinel returned for both mean and std when fewer than two posts exist.
pub const NOT_ENOUGH_POSTS: f64 = -1.0;

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Mean and population std over the full n×n similarity matrix.
///
/// The diagonal is included and every post is fully similar to itself.
/// With fewer than two vectors both values are `NOT_ENOUGH_POSTS`.
pub fn similarity_matrix_stats(vectors: &[&[f64]]) -> (f64, f64) {
    let n = vectors.len();
    if n < 2 {
        return (NOT_ENOUGH_POSTS, NOT_ENOUGH_POSTS);
    }

    let mut matrix = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let sim = if i == j {
                1.0
            } else {
                cosine_similarity(vectors[i], vectors[j])
            };
            matrix.push(sim);
        }
    }

    let summary = Summary::of(&matrix);
    (summary.mean, summary.std)
}
