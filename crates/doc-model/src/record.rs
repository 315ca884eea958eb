//! Flat key-value form of [`RecentFileEntry`] used for persistence.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::entry::{EntryError, RecentFileEntry};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error("timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed recent files JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },
}

/// Serialized entry. Every key is optional when reading, and `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_at_epoch_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

impl RecentFileEntry {
    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            title: Some(self.title().to_owned()),
            local_path: self.local_path().map(ToOwned::to_owned),
            remote_url: self.remote_url().map(ToOwned::to_owned),
            opened_at_epoch_millis: Some(self.opened_at().timestamp_millis()),
            size_bytes: self.size_bytes(),
            thumbnail_path: self.thumbnail_path().map(ToOwned::to_owned),
        }
    }

    pub fn from_record(record: EntryRecord) -> Result<Self, RecordError> {
        let millis = record.opened_at_epoch_millis.unwrap_or_default();
        let opened_at = DateTime::from_timestamp_millis(millis)
            .ok_or(RecordError::TimestampOutOfRange(millis))?;

        let entry = RecentFileEntry::new(
            record.title.unwrap_or_default(),
            record.local_path,
            record.remote_url,
            opened_at,
            record.size_bytes,
        )?;

        Ok(entry.with_thumbnail_path(record.thumbnail_path))
    }
}

/// Encodes entries as the JSON array stored in the recent files slot.
pub fn encode_entries(entries: &[RecentFileEntry]) -> String {
    let records: Vec<EntryRecord> = entries.iter().map(RecentFileEntry::to_record).collect();
    // A Vec of plain string/integer structs cannot fail to serialize.
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_owned())
}

/// Decodes the JSON array stored in the recent files slot.
pub fn decode_entries(json: &str) -> Result<Vec<RecentFileEntry>, DecodeError> {
    let records: Vec<EntryRecord> = serde_json::from_str(json)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            RecentFileEntry::from_record(record)
                .map_err(|source| DecodeError::InvalidRecord { index, source })
        })
        .collect()
}
