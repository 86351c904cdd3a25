//! The public query API: binds the fragment graph, the
//! walker/backtracking/combinators, and top-k selection into the
//! `build`/`add_item`/`remove_item`/`find_item(s)(_with_detail)` surface.
//!
//! This facade is deliberately thin — it marshals strings through the
//! configured callbacks and shapes results, the way an HTTP search handler
//! marshals a parsed query through a lexer and shapes a response.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use crate::combine::combine;
use crate::config::EngineConfig;
use crate::graph::FragmentGraph;
use crate::pipeline;
use crate::topk::top_k;

/// A single scored match, with the matched item's current keyword set.
pub type DetailedMatch<T> = (Arc<T>, HashSet<String>, f64);

/// The search engine: a configured fragment graph plus the query/insertion
/// pipeline bound to it.
pub struct Engine<T> {
    graph: FragmentGraph<T>,
    config: EngineConfig,
}

impl<T> Engine<T>
where
    T: Eq + Hash + Send + Sync,
{
    /// Builds an engine from the given configuration.
    pub fn build(config: EngineConfig) -> Self {
        Engine {
            graph: FragmentGraph::new(),
            config,
        }
    }

    /// Runs `raw_keywords` through the configured extractor/normalizer and
    /// registers `item` against the surviving keyword set. Returns `true`
    /// if at least one keyword survived and the item was indexed; `false`
    /// (a no-op) otherwise — including when `raw_keywords` is empty or
    /// normalizes entirely to nothing.
    pub fn add_item(&self, item: T, raw_keywords: &str) -> bool {
        let keywords = pipeline::process(raw_keywords, &*self.config.extractor, &*self.config.normalizer);
        crate::graph_log!(debug, "Engine", "add_item: {} keyword(s) survived the pipeline", keywords.len());
        self.graph.register(item, keywords)
    }

    /// Removes `item` and every edge it contributed, in full.
    pub fn remove_item(&self, item: &T) {
        self.graph.unregister(item);
    }

    /// Top 1 match for `query`, item only.
    pub fn find_item(&self, query: &str) -> Option<Arc<T>> {
        self.find_items(query, 1).into_iter().next()
    }

    /// Top `k` matches for `query`, items only, `0 <= len <= k`.
    pub fn find_items(&self, query: &str, k: usize) -> Vec<Arc<T>> {
        self.find_items_with_detail(query, k)
            .1
            .into_iter()
            .map(|(item, _, _)| item)
            .collect()
    }

    /// Top 1 match for `query`, with its current keyword set and score.
    pub fn find_item_with_detail(&self, query: &str) -> Option<DetailedMatch<T>> {
        self.find_items_with_detail(query, 1).1.into_iter().next()
    }

    /// Top `k` matches for `query`, each with its current keyword set and
    /// score, alongside the query string they were matched against.
    /// Invalid requests (empty query, `k == 0`) return an empty sequence
    /// rather than an error.
    pub fn find_items_with_detail(&self, query: &str, k: usize) -> (String, Vec<DetailedMatch<T>>) {
        if query.is_empty() || k == 0 {
            return (query.to_string(), Vec::new());
        }

        let fragments: Vec<String> = pipeline::process(query, &*self.config.extractor, &*self.config.normalizer)
            .into_iter()
            .collect();
        if fragments.is_empty() {
            return (query.to_string(), Vec::new());
        }

        let scores = combine(
            &self.graph,
            &fragments,
            &*self.config.scorer,
            self.config.unmatched_policy,
            self.config.accumulation_policy,
            self.config.enable_parallel_combine,
        );

        crate::graph_log!(debug, "Engine", "query '{}': {} fragment(s), {} candidate(s)", query, fragments.len(), scores.len());

        let results = top_k(scores, k)
            .into_iter()
            .map(|(item, score)| {
                let keywords = self.graph.keywords_of(&item);
                (item, keywords, score)
            })
            .collect();

        (query.to_string(), results)
    }

    /// Removes every item, keyword, and fragment.
    pub fn clear(&self) {
        self.graph.clear();
    }

    /// `(num_items, num_keywords, num_fragments)`.
    pub fn stats(&self) -> (usize, usize, usize) {
        self.graph.stats()
    }
}

impl<T> Default for Engine<T>
where
    T: Eq + Hash + Send + Sync,
{
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}
