//! `add`, `edit`, `delete`, `list` and `parse` output.

use anyhow::Result;
use comfy_table::Table;
use tokio::io::AsyncReadExt;
use vocab_core::{parse_report, RecordId, VocabularyRecord};

use crate::commands;
use crate::store::HttpStore;

/// Use `text` if given, otherwise read all of stdin.
pub async fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}

pub fn parse(text: &str, json: bool) -> Result<()> {
    let report = parse_report(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report.entries {
        println!("{}: {}", entry.word, entry.meaning);
    }
    for line in &report.skipped {
        println!("  line {} skipped ({}): {}", line.line_number, line.reason, line.content.trim());
    }

    if report.is_empty_result() {
        println!("No valid entries found.");
    } else {
        println!("{} entries, {} lines skipped.", report.entries.len(), report.skipped.len());
    }
    Ok(())
}

pub async fn add(store: &HttpStore, text: &str) -> Result<()> {
    let outcome = commands::add_entries(store, text).await?;

    for record in &outcome.created {
        println!("Added {}: {}", record.word(), record.meaning());
    }
    for (entry, err) in &outcome.rejected {
        println!("  rejected {:?}: {}", entry.word, err);
    }
    for line in &outcome.skipped {
        println!("  line {} skipped ({})", line.line_number, line.reason);
    }
    println!("Vocabulary now has {} words.", outcome.vocabulary.len());
    Ok(())
}

pub async fn edit(store: &HttpStore, id: &str, text: &str) -> Result<()> {
    let outcome = commands::edit_entry(store, &RecordId::from(id), text).await?;
    println!("Updated {}: {}", outcome.updated.word(), outcome.updated.meaning());
    Ok(())
}

pub async fn delete(store: &HttpStore, id: &str) -> Result<()> {
    let remaining = commands::delete_entry(store, &RecordId::from(id)).await?;
    println!("Deleted {}. {} words left.", id, remaining.len());
    Ok(())
}

pub async fn list(store: &HttpStore) -> Result<()> {
    let records = commands::list_entries(store).await?;
    if records.is_empty() {
        println!("No words yet. Add some with `vocab add \"word: meaning\"`.");
        return Ok(());
    }
    println!("{}", vocabulary_table(&records));
    Ok(())
}

fn vocabulary_table(records: &[VocabularyRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Word", "Meaning", "Difficulty", "Category"]);
    for record in records {
        table.add_row(vec![
            record.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            record.word().to_string(),
            record.meaning().to_string(),
            record.difficulty.clone().unwrap_or_default(),
            record.category.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub async fn status(store: &HttpStore) -> Result<()> {
    if !store.check_connectivity().await? {
        anyhow::bail!("vocabulary API at {} answered with an error status", store.api_url());
    }
    println!("Vocabulary API at {} is reachable.", store.api_url());
    Ok(())
}
