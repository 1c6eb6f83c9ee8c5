//! Extraction strategies.
//!
//! Each strategy turns raw markup into article text plus whatever metadata
//! it can find. The coordinator tries strategies in priority order and keeps
//! the first substantial result.
//!
//! - `primary`: precision extraction with content rules, density scoring,
//!   link-density gating and JSON-LD `articleBody` recovery
//! - `fallback`: structural container search after denylist removal
//! - `readability`: Mozilla Readability port (`readability` feature)

pub mod fallback;
pub mod primary;
#[cfg(feature = "readability")]
pub mod readability;

use url::Url;

use crate::error::EngineError;
use crate::result::{ArticleMetadata, SourceEngine};

pub use fallback::FallbackEngine;
pub use primary::PrimaryEngine;
#[cfg(feature = "readability")]
pub use readability::ReadabilityEngine;

/// Raw output of one strategy. Empty `text` means "nothing usable".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub text: String,
    pub metadata: ArticleMetadata,
}

impl Extraction {
    #[must_use]
    pub fn new(text: String, metadata: ArticleMetadata) -> Self {
        Self { text, metadata }
    }

    /// No text, metadata only.
    #[must_use]
    pub fn empty(metadata: ArticleMetadata) -> Self {
        Self { text: String::new(), metadata }
    }
}

/// One way of reducing markup to article text.
///
/// Implementations are pure functions of their input: no I/O, no shared
/// mutable state.
pub trait ExtractionStrategy: Send + Sync {
    /// Engine tag recorded in the result when this strategy wins.
    fn name(&self) -> SourceEngine;

    /// Extract text and metadata from `markup`.
    ///
    /// Returning empty text is a normal outcome. Errors are reserved for
    /// failures inside the engine itself.
    fn attempt(&self, markup: &str, url: Option<&Url>) -> Result<Extraction, EngineError>;
}
