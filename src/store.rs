//! Flat-file repository: one CSV per domain is the entire persistence layer.
//!
//! The interface is deliberately narrow (`load`, `append`, `init`) so that the
//! aggregation and command code never touches the file format directly and a
//! future move off flat files stays local to this module.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::records::DomainRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no data file at {} (run `opsboard init` to create it)", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: csv::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} row {row}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        source: csv::Error,
    },
    #[error("{} has headers {found:?}, expected {expected:?}", .path.display())]
    WrongShape {
        path: PathBuf,
        found: Vec<String>,
        expected: Vec<String>,
    },
}

/// Append runs as read-modify-write over a shared file, so appends to the same
/// path within this process are serialized behind one mutex per path.
/// Cross-process writers remain last-write-wins.
fn path_lock(path: &Path) -> &'static Mutex<()> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, &'static Mutex<()>>>> = OnceLock::new();
    let mut locks = LOCKS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *locks
        .entry(path.to_path_buf())
        .or_insert_with(|| Box::leak(Box::new(Mutex::new(()))))
}

pub struct Store<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: DomainRecord> Store<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole table in file row order.
    pub fn load(&self) -> Result<Vec<R>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| self.read_error(e))?;
        self.check_headers(&mut rdr)?;
        let mut records = Vec::new();
        for (i, result) in rdr.deserialize().enumerate() {
            let record = result.map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                row: i + 2, // 1-based, after the header row
                source,
            })?;
            records.push(record);
        }
        log::debug!("loaded {} {} records from {}", records.len(), R::DOMAIN, self.path.display());
        Ok(records)
    }

    /// Append one record: re-read the table fresh, then rewrite the whole file
    /// through a temp file in the same directory and rename it into place. A
    /// crash mid-write never leaves a truncated file, and on any failure the
    /// original file is untouched.
    pub fn append(&self, record: &R) -> Result<(), StoreError> {
        let _guard = path_lock(&self.path)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut records = self.load()?;
        records.push(record.clone());
        self.rewrite(&records)?;
        log::info!(
            "appended {} record to {} ({} rows)",
            R::DOMAIN,
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    /// Create the file with only its header row when absent. Returns whether
    /// anything was created.
    pub fn init(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        self.rewrite(&[])?;
        log::info!("created {} with header row", self.path.display());
        Ok(true)
    }

    fn rewrite(&self, records: &[R]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        {
            // The header row is written explicitly so that an empty table
            // still gets one.
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut tmp);
            wtr.write_record(R::HEADERS)
                .map_err(|e| self.csv_write_error(e))?;
            for record in records {
                wtr.serialize(record).map_err(|e| self.csv_write_error(e))?;
            }
            wtr.flush().map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        tmp.flush().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tmp.persist(&self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }

    fn check_headers(&self, rdr: &mut csv::Reader<fs::File>) -> Result<(), StoreError> {
        let found = rdr.headers().map_err(|e| self.read_error(e))?;
        if found.iter().ne(R::HEADERS.iter().copied()) {
            return Err(StoreError::WrongShape {
                path: self.path.clone(),
                found: found.iter().map(str::to_string).collect(),
                expected: R::HEADERS.iter().map(|h| h.to_string()).collect(),
            });
        }
        Ok(())
    }

    fn read_error(&self, source: csv::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_write_error(&self, source: csv::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, source),
        }
    }
}
