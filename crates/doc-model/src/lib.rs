//! Document model for the recent files list.

mod display;
mod entry;
mod record;

pub use display::{format_relative_time, format_size};
pub use entry::{EntryError, IdentifierKind, RecentFileEntry};
pub use record::{decode_entries, encode_entries, DecodeError, EntryRecord, RecordError};
