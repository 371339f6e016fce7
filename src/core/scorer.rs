//! Fuzzy similarity scoring over strsim primitives.
//!
//! Scores are 0-100 integers. Both inputs are preprocessed (lowercased,
//! non-alphanumeric runs collapsed to single spaces) before scoring, so
//! punctuation and case differences never count against a match.

use strsim::normalized_levenshtein;

/// Scoring strategy for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    /// Plain normalized edit-distance similarity of the processed strings.
    Simple,
    /// Maximum of the plain, token-sorted, and token-set similarities.
    /// More forgiving of word order and of one side carrying extra words.
    Weighted,
}

/// Lowercase and collapse non-alphanumeric runs to single spaces.
fn process(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

fn pct(similarity: f64) -> u8 {
    (similarity * 100.0).round() as u8
}

fn token_sorted(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compare the common-token core of both strings against each side's full
/// token set, pairwise, and keep the best similarity.
fn token_set_similarity(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let join = |base: &[&str], extra: &[&str]| -> String {
        base.iter()
            .chain(extra.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    };

    let base = common.join(" ");
    let left = join(&common, &only_a);
    let right = join(&common, &only_b);

    normalized_levenshtein(&base, &left)
        .max(normalized_levenshtein(&base, &right))
        .max(normalized_levenshtein(&left, &right))
}

/// Score two raw strings on a 0-100 scale. An empty processed string on
/// either side scores 0.
pub fn score(a: &str, b: &str, ratio: Ratio) -> u8 {
    let a = process(a);
    let b = process(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let full = normalized_levenshtein(&a, &b);
    let similarity = match ratio {
        Ratio::Simple => full,
        Ratio::Weighted => full
            .max(normalized_levenshtein(&token_sorted(&a), &token_sorted(&b)))
            .max(token_set_similarity(&a, &b)),
    };
    pct(similarity)
}

/// Best-scoring candidate for `needle`. Candidates are scanned in order
/// and ties go to the later candidate.
pub fn best_match<'a, I>(needle: &str, candidates: I, ratio: Ratio) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for candidate in candidates {
        let candidate_score = score(needle, candidate, ratio);
        match best {
            Some((_, best_score)) if candidate_score < best_score => {}
            _ => best = Some((candidate, candidate_score)),
        }
    }
    best
}
