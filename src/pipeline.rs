use serde::{Deserialize, Serialize};

use crate::entities::{strip_entities, Entities};
use crate::error::Result;
use crate::normalize::Cleaner;

/// A nullable free-text value as it arrives from a dataset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField(Option<String>);

impl TextField {
    pub fn missing() -> Self {
        TextField(None)
    }

    /// Only JSON strings carry text; null, numbers, booleans, arrays and
    /// objects are all treated as missing.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => TextField(Some(s.clone())),
            _ => TextField(None),
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl From<&str> for TextField {
    fn from(s: &str) -> Self {
        TextField(Some(s.to_string()))
    }
}

impl From<String> for TextField {
    fn from(s: String) -> Self {
        TextField(Some(s))
    }
}

impl From<Option<String>> for TextField {
    fn from(s: Option<String>) -> Self {
        TextField(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedField {
    pub text: String,
    pub entities: Entities,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedRecord {
    pub primary: CleanedField,
    pub reply: CleanedField,
}

/// Extract, strip, clean, for each text field of a record.
#[derive(Debug, Clone)]
pub struct FieldPipeline {
    cleaner: Cleaner,
}

impl FieldPipeline {
    pub fn new(cleaner: Cleaner) -> Self {
        FieldPipeline { cleaner }
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    pub fn process_field(&self, field: &TextField) -> Result<CleanedField> {
        let raw = field.as_option();
        let entities = Entities::extract(raw);
        let residual = strip_entities(raw);
        let text = self.cleaner.clean(Some(&residual))?;
        Ok(CleanedField { text, entities })
    }

    /// Both fields go through the same steps independently; if either fails
    /// no partial record is returned.
    pub fn process_record(&self, primary: &TextField, reply: &TextField) -> Result<CleanedRecord> {
        let primary = self.process_field(primary)?;
        let reply = self.process_field(reply)?;
        Ok(CleanedRecord { primary, reply })
    }
}
