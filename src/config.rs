use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::{Cleaner, Whitelist};
use crate::pipeline::FieldPipeline;
use crate::words::{Passthrough, PersianWordNormalizer, WordNormalizer};

/// Dataset columns read and written by the pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Columns {
    pub primary: String,
    pub reply: String,
    /// Prefix for the `_links`, `_hashtags` and `_mentions` columns.
    pub primary_prefix: String,
    pub reply_prefix: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            primary: "description".into(),
            reply: "in_reply_to_text".into(),
            primary_prefix: "description".into(),
            reply_prefix: "reply".into(),
        }
    }
}

impl Columns {
    /// The six auxiliary column names, primary first.
    pub fn entity_columns(&self) -> [String; 6] {
        let p = &self.primary_prefix;
        let r = &self.reply_prefix;
        [
            format!("{p}_links"),
            format!("{p}_hashtags"),
            format!("{p}_mentions"),
            format!("{r}_links"),
            format!("{r}_hashtags"),
            format!("{r}_mentions"),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    pub columns: Columns,
    pub whitelist: Whitelist,
    /// JSON object of word -> canonical word for the Persian normalizer.
    pub lexicon: Option<PathBuf>,
    /// Skip word-level normalization entirely.
    pub passthrough: bool,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: PipelineConfig = serde_json::from_str(&raw)?;
        log::debug!("loaded pipeline config from {:?}", path);
        Ok(cfg)
    }

    pub fn word_normalizer(&self) -> Result<Arc<dyn WordNormalizer>> {
        if self.passthrough {
            return Ok(Arc::new(Passthrough));
        }
        let normalizer = match &self.lexicon {
            Some(path) => PersianWordNormalizer::from_lexicon_file(path)?,
            None => PersianWordNormalizer::new(),
        };
        Ok(Arc::new(normalizer))
    }

    /// Builds the shared, read-only pipeline once per run.
    pub fn build_pipeline(&self) -> Result<FieldPipeline> {
        let cleaner = Cleaner::new(self.word_normalizer()?).with_whitelist(self.whitelist);
        Ok(FieldPipeline::new(cleaner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"columns": {{"primary": "text"}}, "whitelist": {{"latin_digits": true}}}}"#
        )
        .unwrap();
        let cfg = PipelineConfig::load(f.path()).unwrap();
        assert_eq!(cfg.columns.primary, "text");
        assert_eq!(cfg.columns.reply, "in_reply_to_text");
        assert!(cfg.whitelist.latin_digits);
        assert!(!cfg.whitelist.extended_script);
        assert!(!cfg.passthrough);
    }

    #[test]
    fn entity_column_names() {
        let cols = Columns::default().entity_columns();
        assert_eq!(cols[0], "description_links");
        assert_eq!(cols[4], "reply_hashtags");
    }

    #[test]
    fn passthrough_selects_identity_normalizer() {
        let cfg = PipelineConfig {
            passthrough: true,
            ..PipelineConfig::default()
        };
        assert_eq!(cfg.word_normalizer().unwrap().name(), "passthrough");
        assert_eq!(
            PipelineConfig::default().word_normalizer().unwrap().name(),
            "persian"
        );
    }

    #[test]
    fn missing_lexicon_fails_pipeline_build() {
        let cfg = PipelineConfig {
            lexicon: Some(PathBuf::from("/nonexistent/lexicon.json")),
            ..PipelineConfig::default()
        };
        assert!(cfg.build_pipeline().is_err());
    }
}
