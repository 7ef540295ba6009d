//! Shared test doubles for the workflow tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use vocab_core::{ParsedEntry, RecordId, VocabularyRecord};

use vocab_client::store::{StoreError, VocabularyStore};

/// In-memory vocabulary collection with integer IDs.
///
/// Can be told to fail every call, or to hold `list_all` until released.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<VocabularyRecord>>,
    next_id: AtomicI64,
    fail_create_after: Mutex<Option<usize>>,
    unavailable: Mutex<bool>,
    list_gate: Option<Arc<Notify>>,
    pub list_calls: AtomicI64,
    pub lists_completed: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn with_words(words: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.lock().unwrap();
            for (word, meaning) in words {
                let id = store.next_id.fetch_add(1, Ordering::SeqCst);
                records.push(VocabularyRecord::new(word, meaning).unwrap().with_id(id));
            }
        }
        store
    }

    /// Hold every `list_all` until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.list_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Let `n` creates succeed, then reject the rest with a 500.
    pub fn fail_create_after(self, n: usize) -> Self {
        *self.fail_create_after.lock().unwrap() = Some(n);
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn words(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.word().to_string())
            .collect()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::Network("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<VocabularyRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        self.lists_completed.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, entry: &ParsedEntry) -> Result<VocabularyRecord, StoreError> {
        self.check_available()?;
        {
            let mut remaining = self.fail_create_after.lock().unwrap();
            if let Some(n) = remaining.as_mut() {
                if *n == 0 {
                    return Err(StoreError::Backend {
                        status: 500,
                        message: "disk full".into(),
                    });
                }
                *n -= 1;
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = VocabularyRecord::new(&entry.word, &entry.meaning)
            .unwrap()
            .with_id(id);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &RecordId,
        entry: &ParsedEntry,
    ) -> Result<VocabularyRecord, StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *slot = VocabularyRecord::new(&entry.word, &entry.meaning)
            .unwrap()
            .with_id(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id.as_ref() != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
