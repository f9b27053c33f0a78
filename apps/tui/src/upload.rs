//! Files chosen by the user and the preview handles derived from them.

use log::debug;
use reqwest::multipart::{Form, Part};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is empty")]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Png,
    Jpeg,
    Fasta,
    Other,
}

impl FileKind {
    fn detect(name: &str, bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            return Self::Png;
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }
        let lower = name.to_lowercase();
        if bytes.first() == Some(&b'>')
            || [".fasta", ".fa", ".fna"].iter().any(|ext| lower.ends_with(ext))
        {
            return Self::Fasta;
        }
        Self::Other
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG image",
            Self::Jpeg => "JPEG image",
            Self::Fasta => "FASTA sequences",
            Self::Other => "file",
        }
    }
}

/// A file held by exactly one view. Cloning shares the bytes, not ownership
/// of any preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub kind: FileKind,
    bytes: Arc<Vec<u8>>,
}

impl UploadedFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let kind = FileKind::detect(&name, &bytes);
        Self {
            name,
            kind,
            bytes: Arc::new(bytes),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(UploadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::from_bytes(name, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A fresh multipart form with the file under the `file` field.
    /// Forms are single-use, so each attempt in a fallback chain builds one.
    pub fn to_form(&self) -> Form {
        let part = Part::bytes(self.bytes.to_vec()).file_name(self.name.clone());
        Form::new().part("file", part)
    }

    pub fn summary(&self) -> String {
        let size = human_size(self.len());
        match self.kind {
            FileKind::Png => png_dimensions(self.bytes()).map_or_else(
                || format!("PNG image, {size}"),
                |(w, h)| format!("PNG image {w}x{h}, {size}"),
            ),
            FileKind::Fasta => {
                let records = self.bytes.iter().filter(|&&byte| byte == b'>').count();
                format!("FASTA, {records} sequence(s), {size}")
            }
            kind => format!("{}, {size}", kind.label()),
        }
    }
}

fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let width = bytes.get(16..20)?;
    let height = bytes.get(20..24)?;
    Some((
        u32::from_be_bytes(width.try_into().ok()?),
        u32::from_be_bytes(height.try_into().ok()?),
    ))
}

fn human_size(len: usize) -> String {
    if len < 1024 {
        format!("{len} B")
    } else {
        format!("{:.1} KiB", len as f64 / 1024.0)
    }
}

/// Handle to a live preview. Not `Clone`: it is revoked by value.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle(u64);

impl PreviewHandle {
    #[cfg(test)]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview://{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub file_name: String,
    pub summary: String,
}

#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: BTreeMap<u64, Preview>,
    peak_live: usize,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, file: &UploadedFile) -> PreviewHandle {
        self.next_id += 1;
        self.live.insert(
            self.next_id,
            Preview {
                file_name: file.name.clone(),
                summary: file.summary(),
            },
        );
        self.peak_live = self.peak_live.max(self.live.len());
        debug!(
            "preview://{} created for {} ({} live, peak {})",
            self.next_id,
            file.name,
            self.live.len(),
            self.peak_live
        );
        PreviewHandle(self.next_id)
    }

    pub fn revoke(&mut self, handle: PreviewHandle) -> bool {
        self.live.remove(&handle.0).is_some()
    }

    pub fn get(&self, handle: &PreviewHandle) -> Option<&Preview> {
        self.live.get(&handle.0)
    }

    #[cfg(test)]
    pub fn is_live(&self, id: u64) -> bool {
        self.live.contains_key(&id)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Most previews ever alive at once.
    #[cfg(test)]
    pub const fn peak_live(&self) -> usize {
        self.peak_live
    }
}

/// The file a view currently holds, plus its preview when it has one.
#[derive(Debug, Default)]
pub struct UploadSlot {
    file: Option<UploadedFile>,
    preview: Option<PreviewHandle>,
}

impl UploadSlot {
    pub const fn new() -> Self {
        Self {
            file: None,
            preview: None,
        }
    }

    pub const fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub const fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    /// Takes ownership of `file`, dropping the previous one.
    pub fn select(&mut self, file: UploadedFile) {
        self.file = Some(file);
    }

    /// Revokes the previous preview before creating one for `file`.
    pub fn select_with_preview(&mut self, file: UploadedFile, previews: &mut PreviewRegistry) {
        if let Some(old) = self.preview.take() {
            previews.revoke(old);
        }
        self.preview = Some(previews.create(&file));
        self.file = Some(file);
    }

    pub fn release(&mut self, previews: &mut PreviewRegistry) {
        if let Some(old) = self.preview.take() {
            previews.revoke(old);
        }
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes
    }

    #[test]
    fn replacing_a_file_revokes_the_old_preview_first() {
        let mut previews = PreviewRegistry::new();
        let mut slot = UploadSlot::new();

        slot.select_with_preview(UploadedFile::from_bytes("one.png", png(10, 10)), &mut previews);
        let first_id = slot.preview().unwrap().id();

        slot.select_with_preview(UploadedFile::from_bytes("two.png", png(20, 20)), &mut previews);
        let second = slot.preview().unwrap();

        assert!(!previews.is_live(first_id));
        assert_ne!(second.id(), first_id);
        assert_eq!(previews.live_count(), 1);
        assert_eq!(previews.peak_live(), 1);
        assert_eq!(previews.get(second).unwrap().file_name, "two.png");
        assert_eq!(slot.file().unwrap().name, "two.png");
    }

    #[test]
    fn release_leaves_no_live_previews() {
        let mut previews = PreviewRegistry::new();
        let mut slot = UploadSlot::new();
        slot.select_with_preview(UploadedFile::from_bytes("a.jpg", vec![0xFF, 0xD8, 0xFF, 0]), &mut previews);
        slot.release(&mut previews);

        assert_eq!(previews.live_count(), 0);
        assert!(slot.file().is_none());
    }

    #[test]
    fn kinds_are_detected_from_content_and_name() {
        assert_eq!(UploadedFile::from_bytes("x", png(1, 1)).kind, FileKind::Png);
        assert_eq!(
            UploadedFile::from_bytes("reads.txt", b">seq1\nACGT\n>seq2\nTTGA\n".to_vec()).kind,
            FileKind::Fasta
        );
        assert_eq!(UploadedFile::from_bytes("s.fa", b"ACGT".to_vec()).kind, FileKind::Fasta);
        assert_eq!(UploadedFile::from_bytes("notes.txt", b"hi".to_vec()).kind, FileKind::Other);
    }

    #[test]
    fn summaries_describe_the_content() {
        assert_eq!(UploadedFile::from_bytes("f.png", png(640, 480)).summary(), "PNG image 640x480, 24 B");
        let fasta = UploadedFile::from_bytes("r.fasta", b">a\nAC\n>b\nGT\n".to_vec());
        assert!(fasta.summary().starts_with("FASTA, 2 sequence(s)"));
    }

    #[tokio::test]
    async fn empty_files_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.fasta");
        std::fs::write(&path, b"").unwrap();

        let err = UploadedFile::from_path(&path).await.unwrap_err();
        assert!(matches!(err, UploadError::Empty { .. }));
    }

    #[tokio::test]
    async fn files_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fish.png");
        std::fs::write(&path, png(3, 4)).unwrap();

        let file = UploadedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "fish.png");
        assert_eq!(file.kind, FileKind::Png);
        assert_eq!(file.len(), 24);
    }
}
