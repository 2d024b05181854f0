//! Edit-distance similarity between combo slot sequences.
//!
//! The metric is exposed for callers (reports, clustering); nothing here merges combos.

use serde::Serialize;

use crate::data::combo::Combo;

/// Levenshtein distance over characters with unit costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// `1 - distance / max_len` over concatenated slot strings. Two empty sequences are identical.
pub fn sequence_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

pub fn concatenated_slots(combo: &Combo) -> String {
    combo.slots().collect()
}

pub fn combo_similarity(a: &Combo, b: &Combo) -> f64 {
    sequence_similarity(&concatenated_slots(a), &concatenated_slots(b))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarPair {
    pub champion_id: String,
    pub first_id: String,
    pub second_id: String,
    pub first_sequence: String,
    pub second_sequence: String,
    pub similarity: f64,
}

/// Same-champion pairs at or above `threshold`, most similar first.
///
/// Pairs that exact deduplication would already merge are left out.
pub fn find_similar_pairs(combos: &[Combo], threshold: f64) -> Vec<SimilarPair> {
    let mut pairs = Vec::new();

    for (i, first) in combos.iter().enumerate() {
        for second in &combos[i + 1..] {
            if first.champion_id != second.champion_id
                || first.dedup_key() == second.dedup_key()
            {
                continue;
            }
            let similarity = combo_similarity(first, second);
            if similarity >= threshold {
                pairs.push(SimilarPair {
                    champion_id: first.champion_id.clone(),
                    first_id: first.id.clone(),
                    second_id: second.id.clone(),
                    first_sequence: first.ability_sequence(),
                    second_sequence: second.ability_sequence(),
                    similarity,
                });
            }
        }
    }

    pairs.sort_by(|left, right| right.similarity.total_cmp(&left.similarity));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_counts_single_edits() {
        assert_eq!(levenshtein("QWE", "QWER"), 1);
        assert_eq!(levenshtein("QWER", "QWE"), 1);
        assert_eq!(levenshtein("QWE", "QEE"), 1);
        assert_eq!(levenshtein("", "RQ"), 2);
        assert_eq!(levenshtein("EQWR", "EQWR"), 0);
        assert_eq!(levenshtein("QWE", "EWQ"), 2);
    }

    #[test]
    fn similarity_of_one_extra_step() {
        assert!((sequence_similarity("QWE", "QWER") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(sequence_similarity("QWER", "QWER"), 1.0);
        assert_eq!(sequence_similarity("QQ", "WW"), 0.0);
        assert_eq!(sequence_similarity("", ""), 1.0);
    }
}
