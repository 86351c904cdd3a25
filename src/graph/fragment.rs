//! Contiguous-substring enumeration for a single normalized keyword.
//!
//! For a keyword of length L this yields all L*(L+1)/2 contiguous
//! substrings, including the keyword itself and, deliberately, duplicate
//! entries for substrings that occur at more than one position (e.g. "an"
//! appears twice in "banana"). Each entry in the returned vector stands for
//! exactly one fragment->keyword edge increment (or decrement); the edge
//! count discipline is per-position rather than per-distinct-substring, so
//! a keyword with a repeated substring decrements that edge once per
//! occurrence on removal.

/// Enumerates every contiguous substring of `keyword`, one entry per
/// `(start, end)` position pair, in left-to-right, shortest-to-longest
/// order for a given start.
pub fn enumerate_substrings(keyword: &str) -> Vec<String> {
    let chars: Vec<char> = keyword.chars().collect();
    let n = chars.len();
    let mut out = Vec::with_capacity(n * (n + 1) / 2);
    for start in 0..n {
        for end in (start + 1)..=n {
            out.push(chars[start..end].iter().collect());
        }
    }
    out
}
