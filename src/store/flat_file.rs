use crate::domain::{Admin, Book};
use crate::store::codec::{self, LineError};
use crate::store::{BookStore, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores books and admins in two comma-delimited text files.
///
/// Reads tolerate a missing file and skip malformed lines. Writes replace
/// the whole file through a temp file in the same directory.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    pub books_path: PathBuf,
    pub admins_path: PathBuf,
}

impl FlatFileStore {
    pub fn new(books_path: impl Into<PathBuf>, admins_path: impl Into<PathBuf>) -> Self {
        FlatFileStore {
            books_path: books_path.into(),
            admins_path: admins_path.into(),
        }
    }

    /// A store using `books.txt` and `admins.txt` under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("books.txt"), dir.join("admins.txt"))
    }

    /// Reads every line of `path`, decoding each with `decode`.
    ///
    /// A missing file yields an empty vector. Blank lines are ignored and
    /// lines that fail to decode are logged and skipped.
    fn read_records<T>(
        path: &Path,
        decode: fn(&str) -> Result<T, LineError>,
    ) -> Result<Vec<T>, StoreError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (number, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match decode(line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    content = line,
                    "skipping malformed record: {e}"
                ),
            }
        }

        tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    /// Writes one line per record, replacing the file atomically.
    fn write_records<T>(
        path: &Path,
        records: &[T],
        encode: fn(&T) -> String,
    ) -> Result<(), StoreError> {
        let mut data = String::new();
        for record in records {
            data.push_str(&encode(record));
            data.push('\n');
        }

        Self::write_atomic(path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), count = records.len(), "saved records");
        Ok(())
    }

    /// Writes data to a temporary file next to `path` and renames it in place,
    /// so the target is never left half-written.
    fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.persist(path).map_err(|e| StoreError::Persist {
            path: path.display().to_string(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl BookStore for FlatFileStore {
    fn load_books(&self) -> Result<Vec<Book>, StoreError> {
        Self::read_records(&self.books_path, codec::decode_book)
    }

    fn save_books(&mut self, books: &[Book]) -> Result<(), StoreError> {
        Self::write_records(&self.books_path, books, codec::encode_book)
    }

    fn load_admins(&self) -> Result<Vec<Admin>, StoreError> {
        Self::read_records(&self.admins_path, codec::decode_admin)
    }

    fn save_admins(&mut self, admins: &[Admin]) -> Result<(), StoreError> {
        Self::write_records(&self.admins_path, admins, codec::encode_admin)
    }
}
