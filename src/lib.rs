//! In-memory, low-latency, incremental-substring search engine for
//! interactive "type-ahead" UIs.
//!
//! Callers register items tagged with free-form keyword strings; queries
//! walk the fragment graph — every contiguous substring of every
//! normalized keyword — to return a ranked list of the best-matching
//! items. See `SPEC_FULL.md` in the repository root for the full design.
//!
//! ```
//! use fragsearch::Engine;
//!
//! let engine: Engine<&str> = Engine::default();
//! engine.add_item("Hero", "Walt Kowalski Jake Blues Shaun");
//! engine.add_item("Villain", "Roy Batty Lord Voldemort Colonel Kurtz");
//!
//! // Backtracking finds "Hero" via its keyword "walt" even though the
//! // query "walk" isn't a literal substring of anything indexed.
//! assert_eq!(engine.find_item("walk"), Some(std::sync::Arc::new("Hero")));
//! ```

#![forbid(unsafe_code)]

pub mod combine;
pub mod config;
pub mod engine;
pub mod graph;
pub mod pipeline;
pub mod topk;
pub mod walk;

pub use config::{AccumulationPolicy, EngineConfig, UnmatchedPolicy};
pub use engine::{DetailedMatch, Engine};
pub use graph::FragmentGraph;
pub use pipeline::{DefaultExtractor, DefaultNormalizer, Extractor, Normalizer};
pub use walk::scorer::{DefaultScorer, Scorer};

/// Emits a structured `tracing` event tagged with the originating module.
#[macro_export]
macro_rules! graph_log {
    ($level:ident, $module:expr, $msg:expr $(, $args:expr)* $(,)?) => {
        tracing::$level!(target: "fragsearch", "[{}] {}", $module, format!($msg $(, $args)*));
    };
}
