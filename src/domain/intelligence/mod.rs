//! Intelligence domain - categorized forensic findings and their extraction.
//!
//! The extraction engine is a pure function over raw message text; the
//! [`ExtractedIntelligence`] container carries findings with set semantics
//! and only ever grows under [`ExtractedIntelligence::merge`].

mod category;
mod extracted;
pub mod extractor;

pub use category::IntelligenceCategory;
pub use extracted::ExtractedIntelligence;
pub use extractor::extract_all;
