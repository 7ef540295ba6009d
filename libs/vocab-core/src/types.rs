//! Core types for the vocabulary client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::RecordError;

/// Opaque identifier assigned by the vocabulary store.
///
/// Stores hand out either numeric or string ids; both are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for RecordId {
    /// Numeric strings become `Int` so ids typed on a command line match the store's.
    fn from(id: &str) -> Self {
        match id.trim().parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(id.trim().to_string()),
        }
    }
}

/// Word/meaning pair produced by the parser (no ID yet).
///
/// Also the request body for store create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub word: String,
    pub meaning: String,
}

impl ParsedEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// Persisted vocabulary record.
///
/// `word` and `meaning` are always trimmed and non-empty: both
/// [`VocabularyRecord::new`] and deserialization reject anything else.
/// Optional attributes and unknown fields are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct VocabularyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    word: String,
    meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VocabularyRecord {
    /// Create an unpersisted record, trimming both fields.
    pub fn new(word: &str, meaning: &str) -> Result<Self, RecordError> {
        let word = word.trim();
        let meaning = meaning.trim();
        if word.is_empty() {
            return Err(RecordError::EmptyWord);
        }
        if meaning.is_empty() {
            return Err(RecordError::EmptyMeaning);
        }

        Ok(Self {
            id: None,
            word: word.to_string(),
            meaning: meaning.to_string(),
            difficulty: None,
            category: None,
            example: None,
            pronunciation: None,
            extra: BTreeMap::new(),
        })
    }

    /// Attach a store-assigned ID.
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    /// The word/meaning pair, e.g. for an update call.
    pub fn entry(&self) -> ParsedEntry {
        ParsedEntry::new(self.word.clone(), self.meaning.clone())
    }
}

impl TryFrom<ParsedEntry> for VocabularyRecord {
    type Error = RecordError;

    fn try_from(entry: ParsedEntry) -> Result<Self, Self::Error> {
        Self::new(&entry.word, &entry.meaning)
    }
}

/// Wire shape of a record before the invariant check.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<RecordId>,
    word: String,
    meaning: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    pronunciation: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawRecord> for VocabularyRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let mut record = Self::new(&raw.word, &raw.meaning)?;
        record.id = raw.id;
        record.difficulty = raw.difficulty;
        record.category = raw.category;
        record.example = raw.example;
        record.pronunciation = raw.pronunciation;
        record.extra = raw.extra;
        Ok(record)
    }
}

/// Difficulty level attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    /// Get the difficulty name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from string, ignoring case and surrounding whitespace.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
