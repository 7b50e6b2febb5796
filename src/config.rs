//! Configuration for block search.

/// Tunables for the fuzzy block search.
///
/// The defaults are the values the matching pipeline was calibrated with;
/// they rarely need changing outside of experiments.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum length of a usable hint token; shorter tokens are dropped.
    pub min_token_len: usize,

    /// Maximum number of hint tokens considered.
    pub max_tokens: usize,

    /// Length of the normalized-hint prefix used for the prefix tier.
    pub prefix_window: usize,

    /// Candidates with normalized text shorter than this are skipped.
    pub min_candidate_len: usize,

    /// Fuzzy acceptance threshold as a fraction of the token count
    /// (inclusive).
    pub score_threshold: f64,

    /// Maximum preview length attached to successful results.
    pub preview_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConfig {
    /// Create a configuration with the calibrated defaults.
    pub fn new() -> Self {
        Self {
            min_token_len: 3,
            max_tokens: 8,
            prefix_window: 30,
            min_candidate_len: 5,
            score_threshold: 0.5,
            preview_len: 100,
        }
    }

    /// Set the fuzzy acceptance threshold.
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the maximum number of hint tokens considered.
    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = max;
        self
    }

    /// Set the preview length for successful results.
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }
}
