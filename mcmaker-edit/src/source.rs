//! Where operation contents come from.

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// Readable content for a file, unit or drop-in operation.
pub trait ContentSource {
    /// Label used in errors and logs.
    fn describe(&self) -> String;

    /// Base file name, used when an operation leaves its name empty.
    fn file_name(&self) -> Option<&str>;

    fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

/// Content read from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Content already held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: Option<String>,
    bytes: Vec<u8>,
}

impl InlineSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            bytes: bytes.into(),
        }
    }

    pub fn named(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: Some(name.into()),
            bytes: bytes.into(),
        }
    }
}

impl ContentSource for InlineSource {
    fn describe(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<inline>".to_string())
    }

    fn file_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|n| Utf8Path::new(n).file_name())
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
