//! Default port implementations.

use crate::ports::WritePort;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;

/// Writes files to disk and documents to the process stdout.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn write_stdout(&self, contents: &[u8]) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents).context("write stdout")?;
        stdout.flush().context("flush stdout")
    }
}

/// Captures output in memory, for embedding and testing.
#[derive(Debug, Default)]
pub struct InMemoryWritePort {
    files: RefCell<BTreeMap<Utf8PathBuf, Vec<u8>>>,
    stdout: RefCell<Vec<u8>>,
}

impl InMemoryWritePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: &Utf8Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    pub fn stdout(&self) -> Vec<u8> {
        self.stdout.borrow().clone()
    }
}

impl WritePort for InMemoryWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn write_stdout(&self, contents: &[u8]) -> anyhow::Result<()> {
        self.stdout.borrow_mut().extend_from_slice(contents);
        Ok(())
    }
}
