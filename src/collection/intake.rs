/// File discovery and reading for the image collection
///
/// Dropped or picked paths go through three steps:
/// 1. `drop_tree_files` flattens directories (depth-first, sorted by name)
/// 2. `inspect` reads metadata and guesses the MIME type from the extension
/// 3. `decode` reads the bytes and builds the data URL, off the UI thread

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use thiserror::Error;
use walkdir::WalkDir;

use super::entry::DecodedImage;

#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    #[error("{name} is not an image file.")]
    NotAnImage { name: String },
    #[error("{name} is {} MB, over the {} MB limit.", .size / (1024 * 1024), .limit / (1024 * 1024))]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("Only {max} images can be uploaded; {dropped} file(s) were skipped.")]
    TooMany { max: usize, dropped: usize },
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl IntakeError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        IntakeError::Io {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }
}

/// A file found on disk, not yet validated against the collection limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeCandidate {
    pub path: PathBuf,
    pub name: String,
    /// `None` when the extension is not a known image format
    pub mime: Option<String>,
    pub size: u64,
    pub last_modified: Option<i64>,
}

/// MIME type of an image file, judged by its extension
pub fn mime_for(path: &Path) -> Option<String> {
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
        .filter(|mime| mime.starts_with("image/"))
}

/// Paths dropped on the window, held until the frame's drop events are in.
///
/// A multi-file drop arrives as one event per file; scanning them as one
/// batch keeps the cap check and its warning to a single pass.
#[derive(Debug, Default)]
pub struct DropBatch {
    paths: Vec<PathBuf>,
}

impl DropBatch {
    /// Queue a path. Returns true when it opened a new batch.
    pub fn push(&mut self, path: PathBuf) -> bool {
        self.paths.push(path);
        self.paths.len() == 1
    }

    pub fn take(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.paths)
    }
}

/// Every file under `paths`, walking directories depth-first.
///
/// Plain files pass through unchanged. Unreadable directory entries are
/// skipped, matching what a browser drop does with entries it cannot open.
pub fn drop_tree_files(paths: &[PathBuf]) -> impl Iterator<Item = PathBuf> + '_ {
    paths.iter().flat_map(|path| {
        let walk: Box<dyn Iterator<Item = PathBuf>> = if path.is_dir() {
            Box::new(
                WalkDir::new(path)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path()),
            )
        } else {
            Box::new(std::iter::once(path.clone()))
        };
        walk
    })
}

/// Read metadata for one file
pub fn inspect(path: &Path) -> Result<IntakeCandidate, IntakeError> {
    let metadata = std::fs::metadata(path).map_err(|e| IntakeError::io(path, e))?;
    let last_modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64);

    Ok(IntakeCandidate {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        mime: mime_for(path),
        size: metadata.len(),
        last_modified,
    })
}

/// Walk and inspect dropped or picked paths on the blocking pool
pub async fn scan(paths: Vec<PathBuf>) -> Vec<Result<IntakeCandidate, IntakeError>> {
    tokio::task::spawn_blocking(move || {
        tracing::info!("🔍 Scanning {} dropped path(s)", paths.len());
        drop_tree_files(&paths).map(|path| inspect(&path)).collect()
    })
    .await
    .unwrap_or_else(|e| {
        tracing::error!("❌ Scan task failed: {e}");
        Vec::new()
    })
}

/// Read a file and encode it as a data URL
pub async fn decode(candidate: IntakeCandidate) -> Result<DecodedImage, IntakeError> {
    let bytes = tokio::fs::read(&candidate.path)
        .await
        .map_err(|e| IntakeError::io(&candidate.path, e))?;

    let mime = candidate
        .mime
        .ok_or_else(|| IntakeError::NotAnImage {
            name: candidate.name.clone(),
        })?;
    let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));

    tracing::debug!("📷 Read {} ({} bytes)", candidate.name, bytes.len());

    Ok(DecodedImage {
        source: candidate.path,
        name: candidate.name,
        mime,
        size: bytes.len() as u64,
        last_modified: candidate.last_modified,
        data_url,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.PNG")).as_deref(), Some("image/png"));
        assert_eq!(mime_for(Path::new("b.jpeg")).as_deref(), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("notes.txt")), None);
        assert_eq!(mime_for(Path::new("no_extension")), None);
    }

    #[test]
    fn test_drop_batch_flushes_once_per_batch() {
        let mut batch = DropBatch::default();
        assert!(batch.push(PathBuf::from("a.png")));
        assert!(!batch.push(PathBuf::from("b.png")));
        assert!(!batch.push(PathBuf::from("photos")));
        assert_eq!(
            batch.take(),
            vec![PathBuf::from("a.png"), PathBuf::from("b.png"), PathBuf::from("photos")]
        );

        assert!(batch.take().is_empty());
        assert!(batch.push(PathBuf::from("c.png")));
    }

    #[test]
    fn test_drop_tree_is_depth_first_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("a.png"), b"a").unwrap();
        fs::write(root.join("b/inner/c.png"), b"c").unwrap();
        fs::write(root.join("b/z.png"), b"z").unwrap();
        fs::write(root.join("d.txt"), b"d").unwrap();
        let loose = tempfile::NamedTempFile::new().unwrap();

        let inputs = vec![root.to_path_buf(), loose.path().to_path_buf()];
        let found: Vec<PathBuf> = drop_tree_files(&inputs).collect();

        assert_eq!(
            found,
            vec![
                root.join("a.png"),
                root.join("b/inner/c.png"),
                root.join("b/z.png"),
                root.join("d.txt"),
                loose.path().to_path_buf(),
            ]
        );
    }

    #[test]
    fn test_inspect_missing_file() {
        let err = inspect(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, IntakeError::Io { .. }));
    }

    #[tokio::test]
    async fn test_scan_and_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        fs::write(&path, [0u8, 1, 2]).unwrap();

        let scanned = scan(vec![dir.path().to_path_buf()]).await;
        assert_eq!(scanned.len(), 1);
        let candidate = scanned.into_iter().next().unwrap().unwrap();
        assert_eq!(candidate.name, "pixel.png");
        assert_eq!(candidate.size, 3);

        let decoded = decode(candidate).await.unwrap();
        assert_eq!(decoded.data_url, "data:image/png;base64,AAEC");
        assert_eq!(decoded.bytes, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_decode_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        fs::write(&path, "hi").unwrap();

        let candidate = inspect(&path).unwrap();
        assert!(matches!(
            decode(candidate).await,
            Err(IntakeError::NotAnImage { .. })
        ));
    }
}
