//! The ledger store: the ordered record sequence and its write-through persistence.
//!
//! Every mutation writes the entire sequence back to the `Storage` before returning. There is no
//! batching, and the in-memory sequence is what everything else reads.

use crate::model::{Record, Records};
use crate::storage::{Storage, TRANSACTIONS_KEY};
use crate::Result;
use anyhow::{ensure, Context};
use serde::Serialize;
use tracing::{debug, trace};

/// A user event that changes the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a record.
    Add(Record),
    /// Remove the record at an index.
    Delete(usize),
    /// Take the record at an index out of the ledger so that it can be re-entered.
    BeginEdit(usize),
    /// Replace the whole ledger.
    Restore(Records),
}

/// What a dispatched `Action` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied {
    Added { index: usize },
    Deleted { index: usize, record: Record },
    Editing { index: usize, record: Record },
    Restored { count: usize },
}

/// Owns the record sequence and the storage it is persisted to.
#[derive(Debug)]
pub struct LedgerStore<S: Storage> {
    records: Records,
    storage: S,
}

impl<S: Storage> LedgerStore<S> {
    /// Loads the persisted sequence from `storage`.
    ///
    /// Nothing stored, a storage read failure and unparseable content all produce an empty
    /// ledger. None of these are reported as errors.
    pub async fn load(storage: S) -> Self {
        let records = match storage.get(TRANSACTIONS_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Records>(&json) {
                Ok(records) => records,
                Err(e) => {
                    debug!("Ignoring unparseable ledger data: {e}");
                    Records::new()
                }
            },
            Ok(None) => {
                debug!("No ledger data stored yet");
                Records::new()
            }
            Err(e) => {
                debug!("Unable to read ledger data: {e:#}");
                Records::new()
            }
        };
        debug!("Loaded {} records", records.len());
        Self { records, storage }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends `record` and persists. Returns the index it landed at.
    pub async fn add(&mut self, record: Record) -> Result<usize> {
        trace!("add {record:?}");
        self.records.push(record);
        self.persist().await?;
        Ok(self.records.len() - 1)
    }

    /// Removes the record at `index`, shifting later records down by one, and persists.
    ///
    /// # Errors
    /// - `index` is out of range. Nothing is removed or persisted in that case.
    /// - The write to storage fails.
    pub async fn delete_at(&mut self, index: usize) -> Result<Record> {
        self.check_index(index)?;
        let record = self.records.remove(index);
        trace!("deleted {index}: {record:?}");
        self.persist().await?;
        Ok(record)
    }

    /// Returns the record at `index` so it can be edited, removing it from the ledger first.
    ///
    /// The removal is persisted right away. The edited values only come back when they are
    /// added again as a new record; if that never happens, the record is gone.
    pub async fn begin_edit(&mut self, index: usize) -> Result<Record> {
        self.delete_at(index)
            .await
            .with_context(|| format!("Unable to edit record {index}"))
    }

    /// Discards the current sequence and installs `records` as-is, then persists.
    pub async fn replace_all(&mut self, records: Records) -> Result<()> {
        debug!(
            "Replacing {} records with {}",
            self.records.len(),
            records.len()
        );
        self.records = records;
        self.persist().await
    }

    /// Applies an `Action` to the ledger.
    pub async fn dispatch(&mut self, action: Action) -> Result<Applied> {
        Ok(match action {
            Action::Add(record) => Applied::Added {
                index: self.add(record).await?,
            },
            Action::Delete(index) => Applied::Deleted {
                index,
                record: self.delete_at(index).await?,
            },
            Action::BeginEdit(index) => Applied::Editing {
                index,
                record: self.begin_edit(index).await?,
            },
            Action::Restore(records) => {
                let count = records.len();
                self.replace_all(records).await?;
                Applied::Restored { count }
            }
        })
    }

    /// Serializes the whole sequence and writes it to storage.
    pub async fn persist(&self) -> Result<()> {
        let json =
            serde_json::to_string(&self.records).context("Unable to serialize the ledger")?;
        self.storage
            .set(TRANSACTIONS_KEY, &json)
            .await
            .context("Unable to persist the ledger")
    }

    fn check_index(&self, index: usize) -> Result<()> {
        ensure!(
            index < self.records.len(),
            "No record at index {index}, the ledger has {} record{}",
            self.records.len(),
            if self.records.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }
}
