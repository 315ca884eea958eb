//! Recent files bookkeeping and viewer plumbing around an external PDF renderer.

pub mod config;
pub mod home;
pub mod probe;
pub mod recent_files;
pub mod session;
pub mod source;

pub use config::{ConfigError, ViewerConfig, DEFAULT_SAMPLE_URL};
pub use home::Home;
pub use probe::{FileProbe, LocalFileSystem};
pub use recent_files::{BackendMode, RecentFilesStore, MAX_RECENT_FILES, RECENT_FILES_KEY};
pub use session::{ViewerEvents, ViewerSession, ViewerState};
pub use source::{DocumentSource, SourceError};

pub use doc_model::RecentFileEntry;
pub use storage::{KeyValueStore, MemoryStore, Storage};
