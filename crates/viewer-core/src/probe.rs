use std::fs;

/// Filesystem queries the recent files list depends on.
pub trait FileProbe {
    /// Returns whether a regular file currently exists at `path`.
    fn is_file(&self, path: &str) -> bool;

    /// Returns the byte size of the file at `path`, if it can be read.
    fn file_size(&self, path: &str) -> Option<u64>;
}

/// [`FileProbe`] over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileProbe for LocalFileSystem {
    fn is_file(&self, path: &str) -> bool {
        fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
    }

    fn file_size(&self, path: &str) -> Option<u64> {
        fs::metadata(path).ok().filter(|meta| meta.is_file()).map(|meta| meta.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_system_reports_files_only() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("doc.pdf");
        fs::write(&file, vec![0u8; 2048]).unwrap();

        let probe = LocalFileSystem;
        let file = file.to_str().unwrap();
        let dir = temp.path().to_str().unwrap();

        assert!(probe.is_file(file));
        assert_eq!(probe.file_size(file), Some(2048));
        assert!(!probe.is_file(dir));
        assert_eq!(probe.file_size(dir), None);
        assert!(!probe.is_file("/definitely/not/here.pdf"));
    }
}
