//! String similarity ratios in [0, 1]

use crate::config::SimilarityAlgorithm;
use strsim::{jaro_winkler, normalized_levenshtein};

/// `2 * M / T`, where `M` is the length of the longest common subsequence of
/// characters and `T` the combined character count. Two empty strings score 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity of `a` and `b` under the chosen algorithm.
pub fn similarity(algorithm: SimilarityAlgorithm, a: &str, b: &str) -> f64 {
    match algorithm {
        SimilarityAlgorithm::SequenceRatio => sequence_ratio(a, b),
        SimilarityAlgorithm::JaroWinkler => jaro_winkler(a, b),
        SimilarityAlgorithm::NormalizedLevenshtein => normalized_levenshtein(a, b),
    }
}
