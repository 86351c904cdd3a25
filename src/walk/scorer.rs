//! The pluggable `(query, keyword) -> score` function.

/// Scores a single (query fragment, keyword) pair. Must be pure: same
/// inputs must always produce the same output, with no side effects — this
/// is required so that fork-join combinators may safely call it from more
/// than one thread.
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str, keyword: &str) -> f64;
}

/// Default scorer: `length(query) / length(keyword) + (keyword starts with
/// query ? 1.0 : 0.0)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultScorer;

impl Scorer for DefaultScorer {
    fn score(&self, query: &str, keyword: &str) -> f64 {
        let query_len = query.chars().count() as f64;
        let keyword_len = keyword.chars().count() as f64;
        let ratio = if keyword_len == 0.0 { 0.0 } else { query_len / keyword_len };
        let prefix_bonus = if keyword.starts_with(query) { 1.0 } else { 0.0 };
        ratio + prefix_bonus
    }
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn score(&self, query: &str, keyword: &str) -> f64 {
        self(query, keyword)
    }
}
