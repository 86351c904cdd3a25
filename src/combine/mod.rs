//! Union and intersection combinators across a multi-fragment query, with
//! an optional fork-join parallel execution mode.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::config::{AccumulationPolicy, UnmatchedPolicy};
use crate::graph::FragmentGraph;
use crate::walk::backtrack::walk_with_backtracking;
use crate::walk::scorer::Scorer;

type ScoreMap<T> = HashMap<Arc<T>, f64>;

fn merge_union<T>(mut into: ScoreMap<T>, from: ScoreMap<T>) -> ScoreMap<T>
where
    T: Eq + Hash,
{
    for (item, score) in from {
        *into.entry(item).or_insert(0.0) += score;
    }
    into
}

fn merge_intersection<T>(into: ScoreMap<T>, from: ScoreMap<T>) -> ScoreMap<T>
where
    T: Eq + Hash,
{
    if into.is_empty() || from.is_empty() {
        return HashMap::new();
    }
    into.into_iter()
        .filter_map(|(item, score)| from.get(&item).map(|other| (item, score + other)))
        .collect()
}

fn combine_sequential<T>(
    graph: &FragmentGraph<T>,
    fragments: &[String],
    scorer: &dyn Scorer,
    unmatched_policy: UnmatchedPolicy,
    accumulation_policy: AccumulationPolicy,
) -> ScoreMap<T>
where
    T: Eq + Hash,
{
    match accumulation_policy {
        AccumulationPolicy::Union => fragments.iter().fold(HashMap::new(), |acc, fragment| {
            let matched = walk_with_backtracking(graph, fragment, scorer, unmatched_policy);
            merge_union(acc, matched)
        }),
        AccumulationPolicy::Intersection => {
            let mut acc = walk_with_backtracking(graph, &fragments[0], scorer, unmatched_policy);
            for fragment in &fragments[1..] {
                if acc.is_empty() {
                    // Intersection shrinks monotonically; once empty it
                    // stays empty, so stop walking further fragments.
                    return acc;
                }
                let matched = walk_with_backtracking(graph, fragment, scorer, unmatched_policy);
                acc = merge_intersection(acc, matched);
            }
            acc
        }
    }
}

fn combine_parallel<T>(
    graph: &FragmentGraph<T>,
    fragments: &[String],
    scorer: &dyn Scorer,
    unmatched_policy: UnmatchedPolicy,
    accumulation_policy: AccumulationPolicy,
) -> ScoreMap<T>
where
    T: Eq + Hash + Send + Sync,
{
    // Base case large enough to amortize rayon's task overhead.
    if fragments.len() <= 2 {
        return combine_sequential(graph, fragments, scorer, unmatched_policy, accumulation_policy);
    }

    let mid = fragments.len() / 2;
    let (left, right) = fragments.split_at(mid);
    let (left_result, right_result) = rayon::join(
        || combine_parallel(graph, left, scorer, unmatched_policy, accumulation_policy),
        || combine_parallel(graph, right, scorer, unmatched_policy, accumulation_policy),
    );

    match accumulation_policy {
        AccumulationPolicy::Union => merge_union(left_result, right_result),
        AccumulationPolicy::Intersection => merge_intersection(left_result, right_result),
    }
}

/// Combines the per-fragment walk results for a multi-fragment query.
///
/// `N = 1` bypasses combination entirely. `N >= 2` dispatches to a
/// sequential fold or, when `parallel` is set, a `rayon::join`
/// divide-and-conquer tree-reduce that produces the same membership and
/// (within floating-point tolerance) the same scores as the sequential
/// path.
pub fn combine<T>(
    graph: &FragmentGraph<T>,
    fragments: &[String],
    scorer: &dyn Scorer,
    unmatched_policy: UnmatchedPolicy,
    accumulation_policy: AccumulationPolicy,
    parallel: bool,
) -> ScoreMap<T>
where
    T: Eq + Hash + Send + Sync,
{
    match fragments {
        [] => HashMap::new(),
        [only] => walk_with_backtracking(graph, only, scorer, unmatched_policy),
        _ if parallel => combine_parallel(graph, fragments, scorer, unmatched_policy, accumulation_policy),
        _ => combine_sequential(graph, fragments, scorer, unmatched_policy, accumulation_policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::scorer::DefaultScorer;
    use std::collections::HashSet;

    fn kw(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn manager_scenario() -> FragmentGraph<&'static str> {
        let graph = FragmentGraph::new();
        graph.register("Jane Doe", kw(&["jane", "doe", "marketing", "manager"]));
        graph.register("Alice", kw(&["alice", "manager", "cryptography"]));
        graph.register("Eve", kw(&["eve", "accounting", "manager"]));
        graph
    }

    fn frags(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn union_of_single_fragment_matches_all_three() {
        let graph = manager_scenario();
        let result = combine(
            &graph,
            &frags(&["mana"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn union_of_two_fragments_matches_all_three_eve_first() {
        let graph = manager_scenario();
        let result = combine(
            &graph,
            &frags(&["mana", "acc"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        assert_eq!(result.len(), 3);
        let eve_score = result[&Arc::new("Eve")];
        for (item, score) in &result {
            if item.as_ref() != &"Eve" {
                assert!(eve_score > *score);
            }
        }
    }

    #[test]
    fn intersection_of_two_fragments_matches_only_eve() {
        let graph = manager_scenario();
        let result = combine(
            &graph,
            &frags(&["mana", "acc"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Intersection,
            false,
        );
        assert_eq!(result.len(), 1);
        assert!(result.contains_key(&Arc::new("Eve")));
    }

    #[test]
    fn intersection_is_monotone() {
        // Adding a fragment to the query can only shrink (or preserve) the
        // intersection result set.
        let graph = manager_scenario();
        let smaller = combine(
            &graph,
            &frags(&["mana"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Intersection,
            false,
        );
        let larger_query = combine(
            &graph,
            &frags(&["mana", "acc"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Intersection,
            false,
        );
        for item in larger_query.keys() {
            assert!(smaller.contains_key(item));
        }
    }

    #[test]
    fn union_is_commutative_across_fragment_order() {
        let graph = manager_scenario();
        let forward = combine(
            &graph,
            &frags(&["mana", "acc"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        let backward = combine(
            &graph,
            &frags(&["acc", "mana"]),
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        assert_eq!(forward.len(), backward.len());
        for (item, score) in &forward {
            assert!((backward[item] - score).abs() < 1e-9);
        }
    }

    #[test]
    fn parallel_combine_matches_sequential_membership_and_scores() {
        let graph = manager_scenario();
        let fragments = frags(&["mana", "acc", "jan", "ali"]);
        let sequential = combine(
            &graph,
            &fragments,
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        let parallel = combine(
            &graph,
            &fragments,
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            true,
        );
        assert_eq!(sequential.len(), parallel.len());
        for (item, score) in &sequential {
            assert!((parallel[item] - score).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_fragment_list_returns_empty() {
        let graph = manager_scenario();
        let result = combine(
            &graph,
            &[],
            &DefaultScorer,
            UnmatchedPolicy::Backtracking,
            AccumulationPolicy::Union,
            false,
        );
        assert!(result.is_empty());
    }
}
