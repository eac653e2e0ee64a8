//! Port traits abstracting output I/O away from the pipeline.

use camino::Utf8Path;

/// Destination for rendered documents.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn write_stdout(&self, contents: &[u8]) -> anyhow::Result<()>;
}
