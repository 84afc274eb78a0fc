//! Normalization of noisy Persian social-media text.
//!
//! Each text field goes through entity extraction (links, hashtags,
//! mentions), stripping of those spans, and the canonical cleaner: whitelist
//! filter, digit remap, glyph folding, repeat and whitespace collapse, and a
//! word-level normalizer.

pub mod config;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod glyphs;
pub mod normalize;
pub mod pipeline;
pub mod words;

pub use config::{Columns, PipelineConfig};
pub use entities::{extract_hashtags, extract_links, extract_mentions, strip_entities, Entities};
pub use error::{CleanError, Result};
pub use glyphs::{EquivalenceRule, GlyphNormalizer, PERSIAN_RULES};
pub use normalize::{Cleaner, Whitelist};
pub use pipeline::{CleanedField, CleanedRecord, FieldPipeline, TextField};
pub use words::{Passthrough, PersianWordNormalizer, WordNormalizer};
