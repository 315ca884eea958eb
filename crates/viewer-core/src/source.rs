use chrono::{DateTime, Utc};
use doc_model::{EntryError, RecentFileEntry};
use std::path::Path;

use crate::probe::FileProbe;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("no document path or URL was given")]
    Empty,
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("file does not exist: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// A document the user picked or typed on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Local(String),
    Remote(String),
}

impl DocumentSource {
    /// Interprets user input as an `http(s)` URL or a local path.
    ///
    /// `file://` URLs are treated as local paths; other schemes are rejected.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SourceError::Empty);
        }

        let Some((scheme, rest)) = input.split_once("://") else {
            return Ok(Self::Local(input.to_owned()));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" => Ok(Self::Remote(input.to_owned())),
            "file" if !rest.is_empty() => Ok(Self::Local(rest.to_owned())),
            "file" => Err(SourceError::Empty),
            _ if is_scheme(scheme) => Err(SourceError::UnsupportedScheme(scheme.to_owned())),
            _ => Ok(Self::Local(input.to_owned())),
        }
    }

    pub fn locator(&self) -> &str {
        match self {
            Self::Local(path) | Self::Remote(path) => path,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Display title: the file name, or the last URL path segment.
    pub fn title(&self) -> String {
        let name = match self {
            Self::Local(path) => Path::new(path).file_name().and_then(|name| name.to_str()),
            Self::Remote(url) => url_file_name(url),
        };

        name.filter(|name| !name.is_empty()).unwrap_or(self.locator()).to_owned()
    }

    /// Builds the recent files entry for this source, sizing local files through `probe`.
    pub fn to_entry(
        &self,
        probe: &impl FileProbe,
        opened_at: DateTime<Utc>,
    ) -> Result<RecentFileEntry, SourceError> {
        let entry = match self {
            Self::Local(path) => {
                RecentFileEntry::local(self.title(), path.as_str(), opened_at, probe.file_size(path))?
            }
            Self::Remote(url) => RecentFileEntry::remote(self.title(), url.as_str(), opened_at)?,
        };

        Ok(entry)
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn url_file_name(url: &str) -> Option<&str> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme.split(|c| c == '?' || c == '#').next().unwrap_or_default();

    // The first segment is the host.
    path.split('/').skip(1).filter(|segment| !segment.is_empty()).last()
}
