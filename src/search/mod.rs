//! Fuzzy block search.
//!
//! Locates an extracted [`TextBlock`](crate::extractor::TextBlock) from a
//! free-form text hint, grounding externally produced instructions ("the
//! paragraph that says Full Name") onto concrete block indices. Three
//! matching tiers exist; the default `Fuzzy` mode tries the stricter two
//! first and falls back to word-overlap scoring.
//!
//! ## Example
//!
//! ```
//! use docsplice::extractor::extract_blocks;
//! use docsplice::search::{search, SearchMode, SearchOutcome};
//!
//! let blocks = extract_blocks("<p>Full Name</p><p>Date of Birth</p>").blocks;
//! match search(&blocks, "full name", SearchMode::Fuzzy) {
//!     SearchOutcome::Found(m) => assert_eq!(m.index, 0),
//!     SearchOutcome::NotFound(reason) => panic!("no match: {:?}", reason),
//! }
//! ```

mod block_search;

pub use block_search::{
    search, search_with_config, MatchTier, NoMatchReason, SearchMatch, SearchMode, SearchOutcome,
};
