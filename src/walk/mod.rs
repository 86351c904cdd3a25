//! Walking a single query fragment to a scored item map, with optional
//! backtracking.

pub mod backtrack;
pub mod scorer;
