//! Progressive tail-trimming retry over [`crate::graph::FragmentGraph::walk_and_score`].

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::config::UnmatchedPolicy;
use crate::graph::FragmentGraph;
use crate::walk::scorer::Scorer;

/// Walks `fragment` against `graph`. Under [`UnmatchedPolicy::Backtracking`],
/// an empty result is retried with the fragment's last character removed,
/// repeating until a non-empty result appears or the fragment shrinks to
/// length one. Under [`UnmatchedPolicy::Exact`] there is no retry. The
/// number of walks performed is bounded by the fragment's character length.
pub fn walk_with_backtracking<T>(
    graph: &FragmentGraph<T>,
    fragment: &str,
    scorer: &dyn Scorer,
    policy: UnmatchedPolicy,
) -> HashMap<Arc<T>, f64>
where
    T: Eq + Hash,
{
    let mut current = fragment.to_string();
    loop {
        let result = graph.walk_and_score(&current, scorer);
        if !result.is_empty() || policy == UnmatchedPolicy::Exact {
            return result;
        }

        let len = current.chars().count();
        if len <= 1 {
            return result;
        }
        current = current.chars().take(len - 1).collect();
    }
}
