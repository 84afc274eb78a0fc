use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};
use crate::glyphs::GlyphNormalizer;
use crate::words::WordNormalizer;

/// Runs of this many identical characters (or more) collapse to one.
pub const REPEAT_THRESHOLD: usize = 4;

/// Offset from an ASCII digit to the Persian digit with the same value.
const PERSIAN_DIGIT_OFFSET: u32 = 1728;

/// Which characters survive the first cleaning pass.
///
/// The default admits `آ` (U+0622) through `ی` (U+06CC), Persian digits and
/// whitespace. ASCII digits and presentation forms are dropped there, so by
/// default the digit remap never fires and most of the glyph table only
/// matters for text that reaches it through other paths.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Whitelist {
    /// Let `0`-`9` through so they are remapped to Persian digits.
    pub latin_digits: bool,
    /// Admit the full Arabic block, Arabic Supplement and presentation forms.
    pub extended_script: bool,
}

impl Whitelist {
    pub fn admits(&self, c: char) -> bool {
        if c.is_whitespace() || ('\u{06F0}'..='\u{06F9}').contains(&c) {
            return true;
        }
        if self.latin_digits && c.is_ascii_digit() {
            return true;
        }
        if self.extended_script {
            matches!(c,
                '\u{0600}'..='\u{06FF}'
                | '\u{0750}'..='\u{077F}'
                | '\u{FB50}'..='\u{FDFF}'
                | '\u{FE70}'..='\u{FEFF}')
        } else {
            ('\u{0622}'..='\u{06CC}').contains(&c)
        }
    }
}

pub fn filter_whitelist(text: &str, whitelist: &Whitelist) -> String {
    text.chars().filter(|&c| whitelist.admits(c)).collect()
}

/// `0`-`9` become `۰`-`۹`; everything else passes through.
pub fn remap_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => char::from_u32(c as u32 + PERSIAN_DIGIT_OFFSET).unwrap_or(c),
            c => c,
        })
        .collect()
}

/// Collapses each run of [`REPEAT_THRESHOLD`] or more identical characters to
/// a single one. Newline runs are left to [`collapse_whitespace`].
pub fn collapse_repeats(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        let keep = if run >= REPEAT_THRESHOLD && c != '\n' {
            1
        } else {
            run
        };
        for _ in 0..keep {
            s.push(c);
        }
    }
    s
}

/// Any whitespace run, newlines included, becomes one space; ends are trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The canonical cleaning pipeline for one text value.
///
/// Holds the read-only glyph table and the word-level normalizer; a single
/// instance is meant to be shared across threads.
#[derive(Clone)]
pub struct Cleaner {
    whitelist: Whitelist,
    glyphs: GlyphNormalizer,
    words: Arc<dyn WordNormalizer>,
}

impl Cleaner {
    pub fn new(words: Arc<dyn WordNormalizer>) -> Self {
        Cleaner {
            whitelist: Whitelist::default(),
            glyphs: GlyphNormalizer::default(),
            words,
        }
    }

    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn with_glyphs(mut self, glyphs: GlyphNormalizer) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn word_normalizer(&self) -> &dyn WordNormalizer {
        self.words.as_ref()
    }

    /// Character-level passes: whitelist, digit remap, glyph fold, repeat
    /// collapse and whitespace collapse, in that order.
    pub fn prepare(&self, text: &str) -> String {
        let s = filter_whitelist(text, &self.whitelist);
        let s = remap_digits(&s);
        let s = self.glyphs.fold(&s);
        let s = collapse_repeats(&s);
        collapse_whitespace(&s)
    }

    /// Full clean of a nullable value. Only the word normalizer can fail.
    pub fn clean(&self, text: Option<&str>) -> Result<String> {
        let prepared = self.prepare(text.unwrap_or(""));
        if prepared.is_empty() {
            return Ok(prepared);
        }

        let words: Vec<&str> = prepared.split(' ').collect();
        let normalized = self.words.normalize_batch(&words)?;
        if normalized.len() != words.len() {
            return Err(CleanError::BatchMismatch {
                normalizer: self.words.name().to_string(),
                expected: words.len(),
                got: normalized.len(),
            });
        }

        Ok(normalized
            .iter()
            .map(|w| w.as_str())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

impl std::fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cleaner")
            .field("whitelist", &self.whitelist)
            .field("words", &self.words.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{Passthrough, PersianWordNormalizer};

    fn passthrough() -> Cleaner {
        Cleaner::new(Arc::new(Passthrough))
    }

    #[test]
    fn default_whitelist_drops_latin_punctuation_and_emoji() {
        let w = Whitelist::default();
        assert_eq!(filter_whitelist("سلام! hello 😀 دنیا؟", &w), "سلام   دنیا");
        assert_eq!(filter_whitelist("۱۲۳ 123", &w), "۱۲۳ ");
        assert_eq!(filter_whitelist("\u{200c}", &w), "");
    }

    #[test]
    fn default_whitelist_excludes_presentation_forms() {
        let w = Whitelist::default();
        assert!(!w.admits('\u{FEB3}'));
        assert!(!w.admits('\u{0621}'));
        assert!(w.admits('\u{0622}'));
        assert!(w.admits('\u{06CC}'));
        assert!(!w.admits('\u{06CD}'));
    }

    #[test]
    fn extended_whitelist_admits_presentation_forms() {
        let w = Whitelist {
            extended_script: true,
            ..Whitelist::default()
        };
        assert!(w.admits('\u{FEB3}'));
        assert!(w.admits('\u{076D}'));
        assert!(w.admits('\u{06D2}'));
        assert!(!w.admits('a'));
        assert!(!w.admits('5'));
    }

    #[test]
    fn remaps_ascii_digits() {
        assert_eq!(remap_digits("5"), "۵");
        assert_eq!(remap_digits("0123456789"), "۰۱۲۳۴۵۶۷۸۹");
        assert_eq!(remap_digits("سال 1402"), "سال ۱۴۰۲");
    }

    #[test]
    fn repeat_collapse_threshold() {
        assert_eq!(collapse_repeats("خیلییی"), "خیلییی");
        assert_eq!(collapse_repeats("خیلیییی"), "خیلی");
        assert_eq!(collapse_repeats("خیلییییییی"), "خیلی");
        assert_eq!(collapse_repeats("ههههه ووو"), "ه ووو");
        assert_eq!(collapse_repeats("    "), " ");
        assert_eq!(collapse_repeats("\n\n\n\n"), "\n\n\n\n");
        assert_eq!(collapse_repeats(""), "");
    }

    #[test]
    fn whitespace_collapse_trims_and_joins() {
        assert_eq!(collapse_whitespace("  خوب \t\r\n است\n\n"), "خوب است");
        assert_eq!(collapse_whitespace("\n"), "");
    }

    #[test]
    fn clean_absent_or_empty_is_empty() {
        let c = passthrough();
        assert_eq!(c.clean(None).unwrap(), "");
        assert_eq!(c.clean(Some("")).unwrap(), "");
        assert_eq!(c.clean(Some("!!! ???")).unwrap(), "");
    }

    #[test]
    fn latin_digits_are_stripped_by_default() {
        let c = passthrough();
        assert_eq!(c.clean(Some("ساعت 10 صبح")).unwrap(), "ساعت صبح");
    }

    #[test]
    fn latin_digits_survive_when_admitted() {
        let c = passthrough().with_whitelist(Whitelist {
            latin_digits: true,
            ..Whitelist::default()
        });
        assert_eq!(c.clean(Some("ساعت 10 صبح")).unwrap(), "ساعت ۱۰ صبح");
        assert_eq!(c.clean(Some("0123456789")).unwrap(), "۰۱۲۳۴۵۶۷۸۹");
    }

    #[test]
    fn glyph_fold_runs_before_repeat_collapse() {
        let c = passthrough();
        assert_eq!(c.clean(Some("\u{0623}\u{0625}اا")).unwrap(), "ا");
    }

    #[test]
    fn clean_is_idempotent() {
        let c = passthrough().with_whitelist(Whitelist {
            latin_digits: true,
            extended_script: true,
        });
        for raw in [
            "سلاااااام   دوست\n من 123",
            "كتاب\u{FEB3}\u{FEE0}ي!! خوبه؟",
            "ha ha ها ها هااااا",
            "",
        ] {
            let once = c.clean(Some(raw)).unwrap();
            assert_eq!(c.clean(Some(&once)).unwrap(), once, "input {raw:?}");
        }
    }

    #[test]
    fn words_emptied_by_normalizer_are_dropped() {
        let c = Cleaner::new(Arc::new(PersianWordNormalizer::new()));
        assert_eq!(c.clean(Some("خوب \u{064E} است")).unwrap(), "خوب است");
    }

    struct Doubling;

    impl WordNormalizer for Doubling {
        fn name(&self) -> &str {
            "doubling"
        }

        fn normalize(&self, word: &str) -> Result<String> {
            Ok(word.to_string())
        }

        fn normalize_batch(&self, words: &[&str]) -> Result<Vec<String>> {
            Ok(words.iter().chain(words).map(|w| w.to_string()).collect())
        }
    }

    #[test]
    fn batch_length_mismatch_is_an_error() {
        let c = Cleaner::new(Arc::new(Doubling));
        let err = c.clean(Some("یک دو")).unwrap_err();
        assert!(matches!(
            err,
            CleanError::BatchMismatch {
                expected: 2,
                got: 4,
                ..
            }
        ));
    }
}
