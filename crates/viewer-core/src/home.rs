//! Home screen actions: opening documents and managing the recent list.

use chrono::{DateTime, Utc};
use doc_model::RecentFileEntry;
use storage::{KeyValueStore, Storage};

use crate::config::ViewerConfig;
use crate::probe::{FileProbe, LocalFileSystem};
use crate::recent_files::RecentFilesStore;
use crate::session::ViewerSession;
use crate::source::{DocumentSource, SourceError};

const SAMPLE_TITLE: &str = "Sample PDF";

pub struct Home<S, P = LocalFileSystem> {
    recent: RecentFilesStore<S, P>,
    config: ViewerConfig,
}

impl Home<Storage> {
    /// Home backed by the file store in `config.data_dir`.
    pub fn from_config(config: ViewerConfig) -> Self {
        let recent = RecentFilesStore::new(Storage::with_root(&config.data_dir));
        Self::new(recent, config)
    }
}

impl<S: KeyValueStore, P: FileProbe> Home<S, P> {
    pub fn new(recent: RecentFilesStore<S, P>, config: ViewerConfig) -> Self {
        Self { recent, config }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn recent_store(&self) -> &RecentFilesStore<S, P> {
        &self.recent
    }

    pub fn open_input(
        &mut self,
        input: &str,
    ) -> Result<(RecentFileEntry, ViewerSession), SourceError> {
        self.open_input_at(input, Utc::now())
    }

    /// Opens a picked path or typed URL.
    ///
    /// The entry is recorded as soon as the open is attempted; whether the renderer later
    /// succeeds is reported to the returned session, not to the recent list. Local paths must
    /// name an existing file.
    pub fn open_input_at(
        &mut self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<(RecentFileEntry, ViewerSession), SourceError> {
        let source = DocumentSource::parse(input)?;

        if let DocumentSource::Local(path) = &source {
            if !self.recent.probe().is_file(path) {
                return Err(SourceError::NotFound(path.clone()));
            }
        }

        let entry = source.to_entry(self.recent.probe(), now)?;
        Ok(self.record(entry))
    }

    pub fn open_sample(&mut self) -> Result<(RecentFileEntry, ViewerSession), SourceError> {
        self.open_sample_at(Utc::now())
    }

    /// Records the configured sample document unconditionally.
    pub fn open_sample_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<(RecentFileEntry, ViewerSession), SourceError> {
        let source = DocumentSource::parse(&self.config.sample_url)?;
        let entry = match &source {
            DocumentSource::Remote(url) => RecentFileEntry::remote(SAMPLE_TITLE, url.as_str(), now)?,
            DocumentSource::Local(_) => source.to_entry(self.recent.probe(), now)?,
        };

        Ok(self.record(entry))
    }

    pub fn recent(&mut self) -> Vec<RecentFileEntry> {
        self.recent.list()
    }

    pub fn remove(&mut self, identifier: &str) {
        self.recent.remove(identifier);
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    fn record(&mut self, entry: RecentFileEntry) -> (RecentFileEntry, ViewerSession) {
        let session = ViewerSession::new(entry.title());
        self.recent.add(entry.clone());
        (entry, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recent_files::BackendMode;
    use crate::session::{ViewerEvents, ViewerState};
    use chrono::TimeZone;
    use storage::MemoryStore;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn home_in(dir: &std::path::Path) -> Home<Storage> {
        Home::from_config(
            ViewerConfig::default().with_data_dir(dir).with_sample_url("https://h/sample.pdf"),
        )
    }

    #[test]
    fn end_to_end_recent_files_flow() {
        let temp = tempfile::tempdir().unwrap();
        let doc = temp.path().join("a.pdf");
        std::fs::write(&doc, vec![0u8; 2048]).unwrap();
        let doc = doc.to_str().unwrap().to_owned();

        let mut home = home_in(&temp.path().join("data"));
        assert!(home.recent().is_empty());

        let (entry_a, _) = home.open_input_at(&doc, at(1_000)).unwrap();
        let recent = home.recent();
        assert_eq!(recent, vec![entry_a.clone()]);
        let subtitle = recent[0].subtitle_at(at(1_030));
        assert!(subtitle.contains("local file"));
        assert!(subtitle.contains("2.0 KB"));

        let (entry_b, _) = home.open_input_at("http://h/b.pdf", at(2_000)).unwrap();
        assert_eq!(home.recent(), vec![entry_b.clone(), entry_a]);

        home.remove(&doc);
        assert_eq!(home.recent(), vec![entry_b]);

        home.clear();
        assert!(home.recent().is_empty());
        assert_eq!(home.recent_store().mode(), BackendMode::Persistent);
    }

    #[test]
    fn missing_local_file_is_not_recorded() {
        let temp = tempfile::tempdir().unwrap();
        let mut home = home_in(temp.path());

        let result = home.open_input("/definitely/not/here.pdf");
        assert_eq!(result.err(), Some(SourceError::NotFound("/definitely/not/here.pdf".to_owned())));
        assert!(home.recent().is_empty());
    }

    #[test]
    fn failed_render_still_leaves_entry() {
        let recent = RecentFilesStore::new(MemoryStore::new());
        let mut home = Home::new(recent, ViewerConfig::default());

        let (_, mut session) = home.open_input_at("https://h/broken.pdf", at(0)).unwrap();
        session.document_load_failed("not a PDF");

        assert!(matches!(session.state(), ViewerState::Failed(_)));
        assert_eq!(home.recent().len(), 1);
    }

    #[test]
    fn sample_is_recorded_with_fixed_title() {
        let temp = tempfile::tempdir().unwrap();
        let mut home = home_in(temp.path());

        let (entry, session) = home.open_sample_at(at(0)).unwrap();
        assert_eq!(entry.title(), SAMPLE_TITLE);
        assert_eq!(entry.remote_url(), Some("https://h/sample.pdf"));
        assert_eq!(session.title(), SAMPLE_TITLE);

        home.open_sample_at(at(10)).unwrap();
        assert_eq!(home.recent().len(), 1);
    }
}
