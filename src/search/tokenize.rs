//! Query tokenization.

/// Splits a raw query into lowercase substring probes.
///
/// Whitespace runs separate tokens; nothing else is stripped or stemmed, so
/// `"use-selector"` stays a single probe. An empty or blank query yields no
/// tokens, which the matcher treats as "match everything".
pub fn tokenize(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return vec![];
    }

    trimmed
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| !token.is_empty())
        .collect()
}
