use chrono::{DateTime, Local, Utc};

use crate::display::{format_relative_time, format_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("a recent file entry needs a local path or a remote URL")]
    InvalidEntry,
}

/// Which locator an entry is identified by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    LocalPath,
    RemoteUrl,
}

/// One remembered reference to a previously opened document.
///
/// Entries are immutable; the store models updates as remove-then-reinsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFileEntry {
    title: String,
    local_path: Option<String>,
    remote_url: Option<String>,
    opened_at: DateTime<Utc>,
    size_bytes: Option<u64>,
    thumbnail_path: Option<String>,
}

impl RecentFileEntry {
    /// Creates an entry. Empty locators count as absent.
    ///
    /// `opened_at` is truncated to millisecond precision, the resolution it is persisted with.
    pub fn new(
        title: impl Into<String>,
        local_path: Option<String>,
        remote_url: Option<String>,
        opened_at: DateTime<Utc>,
        size_bytes: Option<u64>,
    ) -> Result<Self, EntryError> {
        let local_path = non_empty(local_path);
        let remote_url = non_empty(remote_url);

        if local_path.is_none() && remote_url.is_none() {
            return Err(EntryError::InvalidEntry);
        }

        Ok(Self {
            title: title.into(),
            local_path,
            remote_url,
            opened_at: truncate_to_millis(opened_at),
            size_bytes,
            thumbnail_path: None,
        })
    }

    pub fn local(
        title: impl Into<String>,
        path: impl Into<String>,
        opened_at: DateTime<Utc>,
        size_bytes: Option<u64>,
    ) -> Result<Self, EntryError> {
        Self::new(title, Some(path.into()), None, opened_at, size_bytes)
    }

    pub fn remote(
        title: impl Into<String>,
        url: impl Into<String>,
        opened_at: DateTime<Utc>,
    ) -> Result<Self, EntryError> {
        Self::new(title, None, Some(url.into()), opened_at, None)
    }

    pub(crate) fn with_thumbnail_path(mut self, thumbnail_path: Option<String>) -> Self {
        self.thumbnail_path = non_empty(thumbnail_path);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn local_path(&self) -> Option<&str> {
        self.local_path.as_deref()
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    pub fn thumbnail_path(&self) -> Option<&str> {
        self.thumbnail_path.as_deref()
    }

    pub fn is_remote(&self) -> bool {
        self.remote_url.is_some()
    }

    /// The local path if present, otherwise the remote URL.
    pub fn identifier(&self) -> &str {
        match (&self.local_path, &self.remote_url) {
            (Some(path), _) => path,
            (None, Some(url)) => url,
            // Unreachable through the constructors.
            (None, None) => "",
        }
    }

    pub fn identifier_kind(&self) -> IdentifierKind {
        if self.local_path.is_some() {
            IdentifierKind::LocalPath
        } else {
            IdentifierKind::RemoteUrl
        }
    }

    /// Returns true if `other` refers to the same document by this entry's kind of identifier.
    ///
    /// A local path is never compared against a remote URL, even when the strings are equal.
    pub fn is_same_document(&self, other: &RecentFileEntry) -> bool {
        match self.identifier_kind() {
            IdentifierKind::LocalPath => {
                other.local_path.is_some() && other.local_path == self.local_path
            }
            IdentifierKind::RemoteUrl => {
                other.remote_url.is_some() && other.remote_url == self.remote_url
            }
        }
    }

    /// Returns true if either locator equals `identifier`.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.local_path.as_deref() == Some(identifier)
            || self.remote_url.as_deref() == Some(identifier)
    }

    /// One-line summary relative to the current local time.
    pub fn subtitle(&self) -> String {
        self.subtitle_at(Local::now())
    }

    /// One-line summary such as `local file • 2.0 KB • 5 minutes ago`.
    pub fn subtitle_at<Tz>(&self, now: DateTime<Tz>) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut parts = Vec::with_capacity(3);

        if self.is_remote() {
            parts.push("network file".to_owned());
        } else {
            parts.push("local file".to_owned());
            if let Some(size) = self.size_bytes {
                parts.push(format_size(size));
            }
        }

        let opened_at = self.opened_at.with_timezone(&now.timezone());
        parts.push(format_relative_time(&opened_at, &now));

        parts.join(" • ")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn truncate_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or(timestamp)
}
