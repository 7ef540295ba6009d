//! Entry workflow: parse free text, write to the store, re-fetch.

use tracing::{debug, info, warn};
use vocab_core::{
    parse_report, validate_entry, ParsedEntry, RecordId, SkippedLine, ValidationError,
    VocabularyRecord,
};

use super::CommandError;
use crate::store::VocabularyStore;

/// Result of a bulk add.
#[derive(Debug)]
pub struct EntryOutcome {
    /// Records created by the store, in input order.
    pub created: Vec<VocabularyRecord>,
    /// Parsed entries that failed validation and were not sent.
    pub rejected: Vec<(ParsedEntry, ValidationError)>,
    /// Input lines the parser dropped.
    pub skipped: Vec<SkippedLine>,
    /// Full list re-fetched after all writes settled.
    pub vocabulary: Vec<VocabularyRecord>,
}

/// Result of an edit.
#[derive(Debug)]
pub struct EditOutcome {
    pub updated: VocabularyRecord,
    pub vocabulary: Vec<VocabularyRecord>,
}

/// Parse `text` and create one record per valid entry.
///
/// Writes are issued one at a time and the first store failure aborts the
/// rest. The list is only re-fetched once every write has completed.
pub async fn add_entries(
    store: &dyn VocabularyStore,
    text: &str,
) -> Result<EntryOutcome, CommandError> {
    let report = parse_report(text);
    for line in &report.skipped {
        debug!(line = line.line_number, reason = ?line.reason, "skipped input line");
    }
    if report.is_empty_result() {
        return Err(CommandError::NoValidEntries);
    }

    let mut created = Vec::new();
    let mut rejected = Vec::new();

    for entry in report.entries {
        if let Err(e) = validate_entry(&entry) {
            warn!(word = %entry.word, "rejected entry: {}", e);
            rejected.push((entry, e));
            continue;
        }
        created.push(store.create(&entry).await?);
    }

    info!(created = created.len(), rejected = rejected.len(), "added entries");
    let vocabulary = store.list_all().await?;

    Ok(EntryOutcome {
        created,
        rejected,
        skipped: report.skipped,
        vocabulary,
    })
}

/// Replace record `id` with the first entry parsed from `text`.
pub async fn edit_entry(
    store: &dyn VocabularyStore,
    id: &RecordId,
    text: &str,
) -> Result<EditOutcome, CommandError> {
    let mut entries = parse_report(text).entries.into_iter();
    let entry = entries.next().ok_or(CommandError::NoValidEntries)?;
    if entries.next().is_some() {
        warn!(%id, "edit text has several entries, using the first");
    }
    validate_entry(&entry)?;

    let updated = store.update(id, &entry).await?;
    let vocabulary = store.list_all().await?;

    Ok(EditOutcome {
        updated,
        vocabulary,
    })
}

/// Delete record `id` and return the refreshed list.
pub async fn delete_entry(
    store: &dyn VocabularyStore,
    id: &RecordId,
) -> Result<Vec<VocabularyRecord>, CommandError> {
    store.delete(id).await?;
    list_entries(store).await
}

pub async fn list_entries(
    store: &dyn VocabularyStore,
) -> Result<Vec<VocabularyRecord>, CommandError> {
    store.list_all().await.map_err(Into::into)
}
