//! Append-only record file with offset-based reads.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::record::HEADER;
use super::StoreError;

/// Append-only file of newline-terminated records.
///
/// The first line is always [`HEADER`]. A record is addressed by the byte
/// offset of its first character. The file handle stays open for the life of
/// the store.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    file: File,
    len: u64,
}

impl RecordStore {
    /// Create a store at `path`, truncating any existing file and writing
    /// the header line.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| StoreError::Open {
                path: path.clone(),
                source,
            })?;

        file.write_all(HEADER.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;

        let len = HEADER.len() as u64 + 1;
        tracing::debug!(path = %path.display(), "Created record store");

        Ok(Self { path, file, len })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size in bytes; the offset the next record will be written at.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the store holds only its header.
    pub fn is_empty(&self) -> bool {
        self.len == HEADER.len() as u64 + 1
    }

    /// Append records at the end of the file.
    ///
    /// Each record is written followed by `\n`. Returns the offset of the
    /// first appended record; later records follow contiguously.
    pub fn append<S: AsRef<str>>(&mut self, records: &[S]) -> Result<u64, StoreError> {
        let first = self.len;
        match self.write_records(records) {
            Ok(written) => {
                self.len += written;
                tracing::debug!(
                    records = records.len(),
                    bytes = written,
                    first_offset = first,
                    "Appended records"
                );
                Ok(first)
            }
            Err(e) => {
                self.roll_back(first);
                Err(e.into())
            }
        }
    }

    fn write_records<S: AsRef<str>>(&mut self, records: &[S]) -> std::io::Result<u64> {
        self.file.seek(SeekFrom::End(0))?;

        let mut written = 0u64;
        let mut writer = BufWriter::new(&mut self.file);
        for record in records {
            let record = record.as_ref();
            writer.write_all(record.as_bytes())?;
            writer.write_all(b"\n")?;
            written += record.len() as u64 + 1;
        }
        writer.flush()?;
        Ok(written)
    }

    /// Discard bytes a failed append left past `len`.
    ///
    /// If the file cannot be truncated, `len` follows the file size instead so
    /// later offsets still match the bytes on disk.
    fn roll_back(&mut self, len: u64) {
        match self.file.set_len(len) {
            Ok(()) => self.len = len,
            Err(e) => {
                tracing::warn!(error = %e, len, "Failed to roll back partial append");
                if let Ok(metadata) = self.file.metadata() {
                    self.len = metadata.len();
                }
            }
        }
    }

    /// Read the record starting at `offset`, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidOffset`] if `offset` is the header, at or
    /// past the end of the file, or not the first byte of a record.
    pub fn read_at(&self, offset: u64) -> Result<String, StoreError> {
        if offset == 0 {
            return Err(StoreError::InvalidOffset {
                offset,
                reason: "offset points at the header",
            });
        }
        if offset >= self.len {
            return Err(StoreError::InvalidOffset {
                offset,
                reason: "offset is past the end of the store",
            });
        }

        let mut file = &self.file;
        file.seek(SeekFrom::Start(offset - 1))?;

        let mut previous = [0u8; 1];
        file.read_exact(&mut previous)?;
        if previous[0] != b'\n' {
            return Err(StoreError::InvalidOffset {
                offset,
                reason: "offset is not the start of a record",
            });
        }

        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
