use serde::{Deserialize, Serialize};
use std::fmt;

pub const CSV_FILE_NAME: &str = "cinema_export.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// A rating exactly as the source provided it: free text ("8/10") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Text(text) => f.write_str(text),
            Rating::Number(number) => {
                if number.is_f64() {
                    // f64 Display drops a zero fraction ("8" rather than "8.0")
                    match number.as_f64() {
                        Some(value) => write!(f, "{}", value),
                        None => write!(f, "{}", number),
                    }
                } else {
                    write!(f, "{}", number)
                }
            }
        }
    }
}

impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Rating::Text(value.to_string())
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Rating::Number(value.into())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Watched,
    Watchlist,
}

impl ListType {
    /// Anything other than "watchlist" is treated as a watched entry.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("watchlist") {
            ListType::Watchlist
        } else {
            ListType::Watched
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_date: Option<String>,
    #[serde(default)]
    pub list_type: ListType,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            is_favorite: false,
            comment: None,
            watched_date: None,
            list_type: ListType::Watched,
        }
    }

    /// Deduplication key: trimmed and lower-cased title.
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Decoded text of one input file, held only until extraction completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// What the extraction service is asked to do for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub instruction: String,
    pub data: String,
    pub schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
