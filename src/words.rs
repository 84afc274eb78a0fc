use std::collections::HashMap;
use std::fs;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;

use crate::error::{CleanError, Result};

const TATWEEL: char = '\u{0640}';

/// Word-level canonicalization applied after the character passes.
///
/// Implementations must be deterministic. An error aborts the whole record.
pub trait WordNormalizer: Send + Sync {
    fn name(&self) -> &str;

    fn normalize(&self, word: &str) -> Result<String>;

    /// Normalizes every word of one text value. Output order must match input
    /// order; backends that support batching can override this.
    fn normalize_batch(&self, words: &[&str]) -> Result<Vec<String>> {
        words.iter().map(|w| self.normalize(w)).collect()
    }
}

/// Returns every word unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl WordNormalizer for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn normalize(&self, word: &str) -> Result<String> {
        Ok(word.to_string())
    }
}

/// Strips harakat and tatweel, maps Arabic-Indic digits to Persian digits and
/// finally rewrites whole words found in an optional lexicon.
#[derive(Debug, Default, Clone)]
pub struct PersianWordNormalizer {
    lexicon: HashMap<String, String>,
}

impl PersianWordNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicon(lexicon: HashMap<String, String>) -> Self {
        PersianWordNormalizer { lexicon }
    }

    /// Loads a JSON object mapping surface words to their canonical spelling.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| CleanError::Lexicon {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let lexicon: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| CleanError::Lexicon {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::debug!("loaded {} lexicon entries from {:?}", lexicon.len(), path);
        Ok(Self::with_lexicon(lexicon))
    }

    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }
}

fn fold_word(word: &str) -> String {
    let mut s = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            TATWEEL => {}
            c if is_combining_mark(c) => {}
            '\u{0660}'..='\u{0669}' => {
                // U+0660 + 0x90 = U+06F0
                s.push(char::from_u32(c as u32 + 0x90).unwrap_or(c));
            }
            c => s.push(c),
        }
    }
    s
}

impl WordNormalizer for PersianWordNormalizer {
    fn name(&self) -> &str {
        "persian"
    }

    fn normalize(&self, word: &str) -> Result<String> {
        let folded = fold_word(word);
        match self.lexicon.get(&folded) {
            Some(canonical) => Ok(canonical.clone()),
            None => Ok(folded),
        }
    }
}
