//! Bounded top-k selection over a score map.
//!
//! A full sort is acceptable for the small result sets this engine is
//! expected to see per query, but we still use a size-`k` bounded
//! `BinaryHeap` so a pathological query that matches a very large slice of
//! the graph doesn't force an `O(n log n)` sort of the whole thing.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Clone)]
struct ScoreEntry<K> {
    score: f64,
    key: K,
}

impl<K> PartialEq for ScoreEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl<K> Eq for ScoreEntry<K> {}

impl<K> PartialOrd for ScoreEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.score.partial_cmp(&other.score)
    }
}

impl<K> Ord for ScoreEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Returns the `k` highest-scoring `(key, score)` pairs, descending by
/// score. Ties are broken stably with respect to the order `entries` is
/// iterated in: the input order is preserved among equal-score entries by
/// the final stable sort. Returns an empty vector if `k == 0`.
pub fn top_k<K>(entries: impl IntoIterator<Item = (K, f64)>, k: usize) -> Vec<(K, f64)> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<ScoreEntry<K>>> = BinaryHeap::with_capacity(k + 1);
    for (key, score) in entries {
        heap.push(Reverse(ScoreEntry { score, key }));
        if heap.len() > k {
            heap.pop();
        }
    }

    let mut out: Vec<(K, f64)> = heap
        .into_iter()
        .map(|Reverse(entry)| (entry.key, entry.score))
        .collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_empty_for_k_zero() {
        assert!(top_k(vec![("a", 1.0)], 0).is_empty());
    }

    #[test]
    fn returns_all_when_fewer_than_k() {
        let result = top_k(vec![("a", 1.0), ("b", 2.0)], 10);
        assert_eq!(result, vec![("b", 2.0), ("a", 1.0)]);
    }

    #[test]
    fn truncates_to_k_highest() {
        let entries = vec![("a", 1.0), ("b", 5.0), ("c", 3.0), ("d", 4.0), ("e", 2.0)];
        let result = top_k(entries, 3);
        assert_eq!(result, vec![("b", 5.0), ("d", 4.0), ("c", 3.0)]);
    }

    #[test]
    fn all_items_at_kth_score_are_eligible() {
        let entries = vec![("a", 1.0), ("b", 1.0), ("c", 1.0)];
        let result = top_k(entries, 2);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|(_, score)| *score == 1.0));
    }
}
