//! Records as the feed sends them, and records as they are displayed

use std::fmt::{Display, Error, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::Category;

/// Used when a record carries none of the description fields
pub const NO_DESCRIPTION: &str = "No description available";
/// Used when a record carries no year
pub const UNKNOWN_YEAR: &str = "Unknown year";

/// A record, as returned by the feed.
///
/// Categories do not agree on field names, so every description field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawRecord {
    /// A record that only has a `year` and a `text`, which is the most common shape
    pub fn new<T: ToString>(year: Option<i64>, text: T) -> Self {
        Self {
            year: year.map(Value::from),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }
}

/// The year of a [`CategoryRecord`]
///
/// The feed value is kept untouched, whatever its JSON type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Year {
    Known(Value),
    Unknown,
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Year::Known(Value::String(s)) => write!(f, "{}", s),
            Year::Known(other) => write!(f, "{}", other),
            Year::Unknown => write!(f, "{}", UNKNOWN_YEAR),
        }
    }
}

/// One normalized item of a category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    year: Year,
    text: String,
}

impl CategoryRecord {
    pub fn new(year: Year, text: String) -> Self {
        Self { year, text }
    }

    pub fn year(&self) -> &Year { &self.year }
    pub fn text(&self) -> &str { &self.text }
}

impl Display for CategoryRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.year {
            Year::Unknown => write!(f, "{}", self.text),
            _ => write!(f, "{}: {}", self.year, self.text),
        }
    }
}

/// Turn a raw feed record into a [`CategoryRecord`]
///
/// The description is the first non-empty of `text`, `extract` and `description`.
pub fn normalize(raw: RawRecord) -> CategoryRecord {
    let RawRecord { year, text, extract, description } = raw;

    let text = text
        .into_iter()
        .chain(extract)
        .chain(description)
        .find(|candidate| candidate.is_empty() == false)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let year = match year {
        Some(value) => Year::Known(value),
        None => Year::Unknown,
    };

    CategoryRecord::new(year, text)
}

/// Normalize every record of a category, then keep the first ones only
pub fn normalize_category(category: Category, raws: Vec<RawRecord>) -> Vec<CategoryRecord> {
    raws.into_iter()
        .take(category.display_limit())
        .map(normalize)
        .collect()
}
