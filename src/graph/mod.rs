//! The fragment graph: the indexed store mapping every contiguous
//! substring of every normalized keyword to the items that carry it.
//!
//! Two parallel string-keyed tables form a bipartite many-to-many relation:
//! `keywords` maps a normalized keyword to the items registered under it,
//! and `fragments` maps a contiguous substring to the keywords it occurs
//! in, with an integer reference count per edge. A single
//! [`parking_lot::RwLock`] over both tables is the baseline concurrency
//! contract, mirroring the `Arc<RwLock<Indexes>>` shape used by in-memory
//! stores elsewhere in the ecosystem (e.g. `oxigraph`'s `MemoryStore`).

pub mod fragment;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::graph::fragment::enumerate_substrings;
use crate::walk::scorer::Scorer;

/// The mutable state guarded by the graph's single reader/writer lock.
struct GraphState<T> {
    /// item -> its full current keyword set.
    items: HashMap<Arc<T>, HashSet<String>>,
    /// keyword -> items currently carrying it.
    keywords: HashMap<String, HashSet<Arc<T>>>,
    /// fragment -> keyword -> reference count.
    fragments: HashMap<String, HashMap<String, u32>>,
}

impl<T> GraphState<T> {
    fn new() -> Self {
        GraphState {
            items: HashMap::new(),
            keywords: HashMap::new(),
            fragments: HashMap::new(),
        }
    }
}

/// Shared, concurrently-readable index of items by keyword fragment.
///
/// `T` is the opaque item payload the caller registers; it is stored
/// behind an `Arc` and handed back to callers as a shared reference, never
/// cloned or mutated by the engine.
pub struct FragmentGraph<T> {
    state: RwLock<GraphState<T>>,
}

impl<T> Default for FragmentGraph<T>
where
    T: Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FragmentGraph<T>
where
    T: Eq + std::hash::Hash,
{
    pub fn new() -> Self {
        FragmentGraph {
            state: RwLock::new(GraphState::new()),
        }
    }

    /// Registers `item` against every keyword in `keywords_set`, creating
    /// keyword and fragment nodes as needed. Returns `false` (a no-op) if
    /// `keywords_set` is empty. Idempotent: registering the same item again
    /// merges the new keyword set into its existing one rather than
    /// duplicating it.
    pub fn register(&self, item: T, keywords_set: HashSet<String>) -> bool {
        if keywords_set.is_empty() {
            return false;
        }

        let mut state = self.state.write();
        let item_arc = Arc::new(item);

        for keyword in &keywords_set {
            if !state.keywords.contains_key(keyword) {
                // First inbound item for this keyword: materialize every
                // contiguous substring and bump its fragment edge.
                for substring in enumerate_substrings(keyword) {
                    *state
                        .fragments
                        .entry(substring)
                        .or_insert_with(HashMap::new)
                        .entry(keyword.clone())
                        .or_insert(0) += 1;
                }
                state.keywords.insert(keyword.clone(), HashSet::new());
            }
            state
                .keywords
                .get_mut(keyword)
                .expect("keyword node just ensured to exist")
                .insert(item_arc.clone());
        }

        let existing = state.items.entry(item_arc).or_insert_with(HashSet::new);
        existing.extend(keywords_set);

        crate::graph_log!(
            debug,
            "FragmentGraph",
            "register: items={}, keywords={}, fragments={}",
            state.items.len(),
            state.keywords.len(),
            state.fragments.len()
        );
        true
    }

    /// Removes `item` from every keyword it was registered under. Keywords
    /// whose item set becomes empty are deleted, decrementing every
    /// fragment edge their substrings produced; fragments left with no
    /// outbound edges are deleted. A no-op if `item` is unknown (idempotent
    /// with respect to repeated removal).
    pub fn unregister(&self, item: &T) {
        let mut state = self.state.write();
        let Some(item_keywords) = state.items.remove(item) else {
            return;
        };

        for keyword in &item_keywords {
            let Some(item_set) = state.keywords.get_mut(keyword) else {
                continue;
            };
            item_set.remove(item);
            if !item_set.is_empty() {
                continue;
            }
            state.keywords.remove(keyword);

            for substring in enumerate_substrings(keyword) {
                let Some(edges) = state.fragments.get_mut(&substring) else {
                    continue;
                };
                if let Some(count) = edges.get_mut(keyword) {
                    *count -= 1;
                    if *count == 0 {
                        edges.remove(keyword);
                    }
                }
                if edges.is_empty() {
                    state.fragments.remove(&substring);
                }
            }
        }

        crate::graph_log!(
            debug,
            "FragmentGraph",
            "unregister: items={}, keywords={}, fragments={}",
            state.items.len(),
            state.keywords.len(),
            state.fragments.len()
        );
    }

    /// Returns the keywords currently associated with `item`, or an empty
    /// set if the item is unknown.
    pub fn keywords_of(&self, item: &T) -> HashSet<String> {
        self.state
            .read()
            .items
            .get(item)
            .cloned()
            .unwrap_or_default()
    }

    /// Walks from the fragment node `fragment` to every keyword that
    /// contains it, scoring each with `scorer`, and sums the score onto
    /// every item carrying a matching keyword. Returns an empty map if the
    /// fragment is absent.
    pub fn walk_and_score(
        &self,
        fragment: &str,
        scorer: &dyn Scorer,
    ) -> HashMap<Arc<T>, f64> {
        let state = self.state.read();
        let mut scores: HashMap<Arc<T>, f64> = HashMap::new();

        let Some(edges) = state.fragments.get(fragment) else {
            return scores;
        };

        for keyword in edges.keys() {
            let s = scorer.score(fragment, keyword);
            let Some(items) = state.keywords.get(keyword) else {
                continue;
            };
            for item in items {
                *scores.entry(item.clone()).or_insert(0.0) += s;
            }
        }

        scores
    }

    /// Removes every item, keyword, and fragment from the graph.
    pub fn clear(&self) {
        let mut state = self.state.write();
        *state = GraphState::new();
        crate::graph_log!(debug, "FragmentGraph", "clear: graph reset");
    }

    /// `(num_items, num_keywords, num_fragments)` — an O(1) snapshot.
    pub fn stats(&self) -> (usize, usize, usize) {
        let state = self.state.read();
        (state.items.len(), state.keywords.len(), state.fragments.len())
    }
}
