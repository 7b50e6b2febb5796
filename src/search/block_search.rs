//! Hint-to-block matching implementation.

use crate::config::SearchConfig;
use crate::extractor::TextBlock;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Leading decoration: bullets, numbering punctuation, whitespace.
    static ref LEADING_NON_ALNUM: Regex = Regex::new(r"^[^a-zA-Z0-9]+").unwrap();
    /// Everything that is neither lowercase alphanumeric nor whitespace.
    static ref PUNCTUATION: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Candidate must start with the hint's normalized prefix
    Prefix,
    /// Candidate must contain the full normalized hint
    Contains,
    /// Prefix, then contains, then token-overlap scoring
    #[default]
    Fuzzy,
}

/// Which tier produced a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Matched on the normalized-hint prefix
    Prefix,
    /// Candidate contained the full normalized hint
    Contains,
    /// Accepted by token-overlap score
    Fuzzy,
}

/// Why a search produced no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchReason {
    /// The hint was empty
    NoHint,
    /// No usable tokens remained after normalization
    HintTooShort,
    /// No candidate reached the acceptance threshold
    NotFound,
}

/// A successful match.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    /// Index of the matching block
    pub index: usize,
    /// Tier that produced the match
    pub tier: MatchTier,
    /// First characters of the block's text, ellipsized if truncated
    pub preview: String,
    /// Raw score fraction (matched tokens / total tokens), fuzzy tier only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Result of one search call.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A block matched
    Found(SearchMatch),
    /// No block matched
    NotFound(NoMatchReason),
}

impl SearchOutcome {
    /// The matching block index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Found(m) => Some(m.index),
            Self::NotFound(_) => None,
        }
    }

    /// Whether a block matched.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Locate a block by fuzzy text hint using the default configuration.
pub fn search(blocks: &[TextBlock], hint: &str, mode: SearchMode) -> SearchOutcome {
    search_with_config(blocks, hint, mode, &SearchConfig::default())
}

/// Locate a block by fuzzy text hint.
///
/// Both the hint and every candidate are normalized (leading decoration
/// stripped, lowercased, punctuation removed). Candidates shorter than the
/// configured minimum are skipped entirely. In `Fuzzy` mode a candidate
/// that matches the prefix or contains tier wins immediately; otherwise the
/// best token-overlap score is accepted if it reaches the threshold
/// fraction of the token count (inclusive), ties going to the earliest
/// candidate.
pub fn search_with_config(
    blocks: &[TextBlock],
    hint: &str,
    mode: SearchMode,
    config: &SearchConfig,
) -> SearchOutcome {
    if hint.trim().is_empty() {
        return SearchOutcome::NotFound(NoMatchReason::NoHint);
    }

    let hint_norm = normalize(hint);
    let tokens: Vec<&str> = hint_norm
        .split_whitespace()
        .filter(|t| t.chars().count() >= config.min_token_len)
        .take(config.max_tokens)
        .collect();
    if tokens.is_empty() {
        log::debug!("search hint {:?} normalized to no usable tokens", hint);
        return SearchOutcome::NotFound(NoMatchReason::HintTooShort);
    }

    let prefix_needle: String = hint_norm.chars().take(config.prefix_window).collect();

    let mut best: Option<(usize, usize)> = None; // (score, block position)

    for (pos, block) in blocks.iter().enumerate() {
        let candidate = normalize(&block.text);
        if candidate.chars().count() < config.min_candidate_len {
            continue;
        }

        if matches!(mode, SearchMode::Prefix | SearchMode::Fuzzy)
            && candidate.starts_with(&prefix_needle)
        {
            return found(block, MatchTier::Prefix, None, config);
        }

        if matches!(mode, SearchMode::Contains | SearchMode::Fuzzy)
            && candidate.contains(&hint_norm)
        {
            return found(block, MatchTier::Contains, None, config);
        }

        if mode == SearchMode::Fuzzy {
            let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
            let score = tokens
                .iter()
                .filter(|t| {
                    candidate_tokens
                        .iter()
                        .any(|c| c.contains(**t) || t.contains(*c))
                })
                .count();
            // Strict improvement keeps the earliest candidate on ties.
            if score > 0 && best.map(|(s, _)| score > s).unwrap_or(true) {
                best = Some((score, pos));
            }
        }
    }

    if mode == SearchMode::Fuzzy {
        if let Some((score, pos)) = best {
            if score as f64 >= config.score_threshold * tokens.len() as f64 {
                let fraction = score as f64 / tokens.len() as f64;
                return found(&blocks[pos], MatchTier::Fuzzy, Some(fraction), config);
            }
        }
    }

    SearchOutcome::NotFound(NoMatchReason::NotFound)
}

fn found(
    block: &TextBlock,
    tier: MatchTier,
    score: Option<f64>,
    config: &SearchConfig,
) -> SearchOutcome {
    SearchOutcome::Found(SearchMatch {
        index: block.index,
        tier,
        preview: preview(&block.text, config.preview_len),
        score,
    })
}

/// Strip leading decoration, lowercase, remove punctuation, collapse
/// whitespace.
fn normalize(s: &str) -> String {
    let s = LEADING_NON_ALNUM.replace(s, "");
    let s = s.to_lowercase();
    let s = PUNCTUATION.replace_all(&s, "");
    WHITESPACE_RUN.replace_all(&s, " ").trim().to_string()
}

/// First `max` characters with an ellipsis when truncated.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}
