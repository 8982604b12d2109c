//! File-backed store: one JSONL file per table

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::row::{Row, TableStore, validate_table_name};

const TABLE_EXT: &str = "jsonl";
const LOCK_EXT: &str = "lock";

/// Directory of `{table}.jsonl` files
///
/// Writes land in a temp file in the same directory and are renamed over the
/// table file, so readers see either the old or the new table, never a mix.
/// Each read or write holds an advisory lock on `{table}.lock`; nothing spans
/// a read-modify-write cycle, so concurrent writers can still lose updates.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    base_path: PathBuf,
}

impl JsonlStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened table store");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file backing `table`
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self.base_path.join(format!("{}.{}", table, TABLE_EXT)))
    }

    fn lock(&self, table: &str) -> Result<File> {
        let path = self.base_path.join(format!("{}.{}", table, LOCK_EXT));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.lock_exclusive()?;
        Ok(file)
    }
}

impl TableStore for JsonlStore {
    fn read<R: Row>(&self) -> Result<Vec<R>> {
        let table = R::table_name();
        let path = self.table_path(table)?;
        debug!(table, ?path, "read: called");

        let lock = self.lock(table)?;
        if !path.exists() {
            debug!(table, "read: table missing, treating as empty");
            lock.unlock()?;
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        lock.unlock()?;

        let mut rows = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = serde_json::from_str(line).map_err(|source| StoreError::Decode {
                table: table.to_string(),
                line: idx + 1,
                source,
            })?;
            rows.push(row);
        }

        debug!(table, row_count = rows.len(), "read: done");
        Ok(rows)
    }

    fn write<R: Row>(&mut self, rows: &[R]) -> Result<()> {
        let table = R::table_name();
        let path = self.table_path(table)?;
        debug!(table, row_count = rows.len(), "write: called");

        // Encode before touching the filesystem so a bad row leaves the table alone
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let line = serde_json::to_string(row).map_err(|source| StoreError::Encode {
                table: table.to_string(),
                source,
            })?;
            lines.push(line);
        }

        let lock = self.lock(table)?;
        let tmp = NamedTempFile::new_in(&self.base_path)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            for line in &lines {
                writeln!(writer, "{}", line)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        lock.unlock()?;

        info!(table, row_count = rows.len(), "Table written");
        Ok(())
    }

    fn tables(&self) -> Result<Vec<String>> {
        let mut tables = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map(|e| e == TABLE_EXT).unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                tables.push(stem.to_string());
            }
        }
        tables.sort();
        Ok(tables)
    }
}
