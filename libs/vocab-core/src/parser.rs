//! Free-text parser for bulk vocabulary entry.
//!
//! # Format
//! One entry per line, word and meaning separated by `:` or `-`:
//! ```text
//! sun: mặt trời
//! cat - con mèo
//! ```
//!
//! The first separator wins, so `note - see: details` becomes
//! `note` / `see: details` and `well-known: adj` becomes `well` / `known: adj`.
//! Lines that do not split into a non-empty word and meaning are dropped.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::types::ParsedEntry;

static ENTRY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?)\s*[:\-]\s*(.+)").expect("entry pattern compiles"));

/// Why a non-blank line produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Neither `:` nor `-` appears in the line.
    NoSeparator,
    /// Nothing but whitespace before the separator.
    EmptyWord,
    /// Nothing but whitespace after the separator.
    EmptyMeaning,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoSeparator => "no ':' or '-' separator",
            Self::EmptyWord => "empty word",
            Self::EmptyMeaning => "empty meaning",
        })
    }
}

/// A dropped input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Parsed entries plus the lines that were dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub entries: Vec<ParsedEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// True when nothing survived parsing.
    pub fn is_empty_result(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse multi-line text into word/meaning entries, in input order.
///
/// Never fails: malformed lines are filtered out.
pub fn parse(text: &str) -> Vec<ParsedEntry> {
    parse_report(text).entries
}

/// Like [`parse`], but also reports every non-blank line that was dropped.
pub fn parse_report(text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(entry) => report.entries.push(entry),
            Err(reason) => report.skipped.push(SkippedLine {
                line_number: idx + 1,
                content: line.to_string(),
                reason,
            }),
        }
    }

    report
}

fn parse_line(line: &str) -> Result<ParsedEntry, SkipReason> {
    let Some(caps) = ENTRY_LINE.captures(line) else {
        return Err(classify_unmatched(line));
    };

    let word = caps.get(1).map_or("", |m| m.as_str()).trim();
    let meaning = caps.get(2).map_or("", |m| m.as_str()).trim();

    if word.is_empty() {
        return Err(SkipReason::EmptyWord);
    }
    if meaning.is_empty() {
        return Err(SkipReason::EmptyMeaning);
    }

    Ok(ParsedEntry::new(word, meaning))
}

fn classify_unmatched(line: &str) -> SkipReason {
    let trimmed = line.trim();
    if !trimmed.contains([':', '-']) {
        SkipReason::NoSeparator
    } else if trimmed.starts_with([':', '-']) {
        SkipReason::EmptyWord
    } else {
        SkipReason::EmptyMeaning
    }
}
