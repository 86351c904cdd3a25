//! Engine configuration: a fluent builder over the pluggable extraction,
//! normalization, scoring, and retry/combination options, in the style of
//! a `QueryBuilder`.

use std::sync::Arc;

use crate::pipeline::{DefaultExtractor, DefaultNormalizer, Extractor, Normalizer};
use crate::walk::scorer::{DefaultScorer, Scorer};

/// How an unmatched query fragment is retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// No retry: an empty walk result is final.
    Exact,
    /// Progressively trim the fragment's tail and retry.
    Backtracking,
}

impl Default for UnmatchedPolicy {
    fn default() -> Self {
        UnmatchedPolicy::Backtracking
    }
}

/// How per-fragment score maps are combined across a multi-fragment query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccumulationPolicy {
    Union,
    Intersection,
}

impl Default for AccumulationPolicy {
    fn default() -> Self {
        AccumulationPolicy::Union
    }
}

/// Configuration for a [`crate::Engine`], built fluently and passed to
/// [`crate::Engine::build`].
#[derive(Clone)]
pub struct EngineConfig {
    pub(crate) extractor: Arc<dyn Extractor>,
    pub(crate) normalizer: Arc<dyn Normalizer>,
    pub(crate) scorer: Arc<dyn Scorer>,
    pub(crate) unmatched_policy: UnmatchedPolicy,
    pub(crate) accumulation_policy: AccumulationPolicy,
    pub(crate) enable_parallel_combine: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the extractor callback (default: §4.5 whitespace/non-word
    /// token splitter).
    pub fn extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Overrides the normalizer callback (default: trim + lowercase).
    pub fn normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Overrides the keyword match scorer (default: §4.2's length-ratio +
    /// prefix-bonus scorer).
    pub fn scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched_policy = policy;
        self
    }

    pub fn accumulation_policy(mut self, policy: AccumulationPolicy) -> Self {
        self.accumulation_policy = policy;
        self
    }

    pub fn enable_parallel_combine(mut self, enabled: bool) -> Self {
        self.enable_parallel_combine = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            extractor: Arc::new(DefaultExtractor),
            normalizer: Arc::new(DefaultNormalizer),
            scorer: Arc::new(DefaultScorer),
            unmatched_policy: UnmatchedPolicy::default(),
            accumulation_policy: AccumulationPolicy::default(),
            enable_parallel_combine: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = EngineConfig::new();
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Backtracking);
        assert_eq!(config.accumulation_policy, AccumulationPolicy::Union);
        assert!(!config.enable_parallel_combine);
    }

    #[test]
    fn builder_overrides_compose() {
        let config = EngineConfig::new()
            .unmatched_policy(UnmatchedPolicy::Exact)
            .accumulation_policy(AccumulationPolicy::Intersection)
            .enable_parallel_combine(true);
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Exact);
        assert_eq!(config.accumulation_policy, AccumulationPolicy::Intersection);
        assert!(config.enable_parallel_combine);
    }
}
