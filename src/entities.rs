use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref RE_LINK: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref RE_HASHTAG: Regex = Regex::new(r"#\S+").unwrap();
    static ref RE_MENTION: Regex = Regex::new(r"@\S+").unwrap();
    static ref RE_NOISE: Regex = Regex::new(r"https?://\S+|#\S+|@\S+").unwrap();
}

fn join_matches(re: &Regex, text: Option<&str>) -> String {
    match text {
        Some(t) => re
            .find_iter(t)
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    }
}

/// Every `http://` / `https://` run up to the next whitespace, space-joined.
pub fn extract_links(text: Option<&str>) -> String {
    join_matches(&RE_LINK, text)
}

pub fn extract_hashtags(text: Option<&str>) -> String {
    join_matches(&RE_HASHTAG, text)
}

pub fn extract_mentions(text: Option<&str>) -> String {
    join_matches(&RE_MENTION, text)
}

/// Deletes links, hashtags and mentions from `text` in a single scan and trims
/// the result.
///
/// Spans are matched on the original text, never by searching for previously
/// extracted strings, so `#a #ab` loses both tags instead of leaving `b`.
pub fn strip_entities(text: Option<&str>) -> String {
    match text {
        Some(t) => RE_NOISE.replace_all(t, "").trim().to_string(),
        None => String::new(),
    }
}

/// Links, hashtags and mentions found in one field, each space-joined.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    pub links: String,
    pub hashtags: String,
    pub mentions: String,
}

impl Entities {
    pub fn extract(text: Option<&str>) -> Self {
        Entities {
            links: extract_links(text),
            hashtags: extract_hashtags(text),
            mentions: extract_mentions(text),
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.split_whitespace().count()
    }

    pub fn hashtag_count(&self) -> usize {
        self.hashtags.split_whitespace().count()
    }

    pub fn mention_count(&self) -> usize {
        self.mentions.split_whitespace().count()
    }
}
