use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// A named byte source that can be either a local file or an in-memory upload.
///
/// The name is available without touching the content, so the file kind can be
/// decided before any byte is read.
#[derive(Clone)]
pub enum FileSource {
    /// Local file on disk
    Local(PathBuf),
    /// Uploaded content already held in memory
    Memory { name: String, bytes: Vec<u8> },
}

impl FileSource {
    /// Creates a source backed by a local path.
    pub fn local<P: Into<PathBuf>>(path: P) -> Self {
        FileSource::Local(path.into())
    }

    /// Creates a source backed by an in-memory buffer.
    ///
    /// # Arguments
    /// * `name` - File name as reported by the uploader (used for kind detection)
    /// * `bytes` - Raw file content
    pub fn memory<N: Into<String>, B: Into<Vec<u8>>>(name: N, bytes: B) -> Self {
        FileSource::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Returns the file name (last path component for local files).
    pub fn name(&self) -> String {
        match self {
            FileSource::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            FileSource::Memory { name, .. } => name.to_owned(),
        }
    }

    /// Returns the content size in bytes when it is known without reading the content.
    pub fn size_hint(&self) -> Option<u64> {
        match self {
            FileSource::Local(path) => fs::metadata(path).ok().map(|metadata| metadata.len()),
            FileSource::Memory { bytes, .. } => Some(bytes.len() as u64),
        }
    }

    /// Reads the whole content.
    ///
    /// # Returns
    /// * `io::Result<Vec<u8>>` - File content, or the I/O fault that prevented reading it
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match self {
            FileSource::Local(path) => fs::read(path),
            FileSource::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }

    /// Returns the local path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileSource::Local(path) => Some(path.as_path()),
            FileSource::Memory { .. } => None,
        }
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Local(path) => f.debug_tuple("Local").field(path).finish(),
            FileSource::Memory { name, bytes } => f
                .debug_struct("Memory")
                .field("name", name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}
