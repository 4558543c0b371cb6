//! JSON-lines snapshot log for debugging.
//!
//! One serialized `GameSnapshot` per line. Write-only; nothing reads it back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameSnapshot;

pub struct SnapshotLog<W: Write> {
    out: W,
    lines: u64,
}

impl SnapshotLog<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("snapshot log: cannot create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Open the log named by `BLOCKS_SNAPSHOT_LOG`, if set and non-empty
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var("BLOCKS_SNAPSHOT_LOG") {
            Ok(path) if !path.trim().is_empty() => Self::create(path.trim()).map(Some),
            _ => Ok(None),
        }
    }
}

impl<W: Write> SnapshotLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn append(&mut self, snap: &GameSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snap)?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of snapshots written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
