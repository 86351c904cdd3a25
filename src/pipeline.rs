//! Converts a raw input string (an insertion's keyword blob, or a caller's
//! query) into the deduplicated set of normalized, non-empty strings the
//! fragment graph operates on.
//!
//! This is the only layer allowed to invoke caller-supplied extractor and
//! normalizer callbacks (see [`crate::config::EngineConfig`]); the graph
//! itself only ever sees already-normalized strings.

use std::collections::HashSet;

/// Splits a raw string into an unordered set of candidate tokens.
pub trait Extractor: Send + Sync {
    fn extract(&self, raw: &str) -> HashSet<String>;
}

/// Normalizes a single token. Returning the empty string drops the token.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, token: &str) -> String;
}

/// Default extractor: collapse runs of non-word characters to a single
/// separator, split on whitespace, and deduplicate.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultExtractor;

impl Extractor for DefaultExtractor {
    fn extract(&self, raw: &str) -> HashSet<String> {
        let collapsed: String = raw
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
            .collect();
        collapsed
            .split_whitespace()
            .map(|tok| tok.to_string())
            .collect()
    }
}

/// Default normalizer: trim surrounding whitespace and lowercase.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultNormalizer;

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, token: &str) -> String {
        token.trim().to_lowercase()
    }
}

/// Runs the full extractor -> per-token normalizer -> dedup pipeline.
///
/// Insertion callers hand the resulting strings to the graph, where they
/// become long-lived `Keyword`/`Fragment` map keys; query callers use them
/// once and let them drop at the end of the call. Both paths go through the
/// same function, so sharing a single normalized form between insertion and
/// query falls out of ordinary Rust ownership rather than a separate
/// mechanism.
pub fn process(raw: &str, extractor: &dyn Extractor, normalizer: &dyn Normalizer) -> HashSet<String> {
    extractor
        .extract(raw)
        .iter()
        .map(|token| normalizer.normalize(token))
        .filter(|normalized| !normalized.is_empty())
        .collect()
}
