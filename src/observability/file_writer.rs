//! Size-rotated append-only file shared by the span exporter and the log layer.
//!
//! When the file grows past its limit it is renamed to `<name>.<nanos>` and a
//! fresh file is started. Only the newest few backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the file exceeds 10 MB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so constructing a writer for
/// a directory that does not exist yet never fails. Every write checks the size
/// first, which keeps rotation correct even when several writers share a
/// directory.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Writer that rotates once the file passes `max_bytes`, keeping `max_backups` old files.
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline.
    ///
    /// # Errors
    ///
    /// Fails when rotation, opening or writing fails, or when the lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.write_bytes(&buf)
    }

    /// Appends raw bytes, rotating first if the file is over its limit.
    ///
    /// # Errors
    ///
    /// Same as [`write_line`](Self::write_line).
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
            *guard = Some(file);
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        file.write_all(bytes)?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn file_name(&self) -> io::Result<String> {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))
    }

    fn rotate(&self) -> io::Result<()> {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let backup = self.file_path.with_file_name(format!("{}.{nanos}", self.file_name()?));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup)?;
        }

        self.prune_backups()
    }

    /// Deletes all but the newest `max_backups` rotated files.
    ///
    /// Individual removal failures are ignored so one stuck file does not
    /// block the rest.
    fn prune_backups(&self) -> io::Result<()> {
        let dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
        let prefix = format!("{}.", self.file_name()?);

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let stamp = name.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

/// Per-event handle given to the fmt layer.
#[derive(Debug)]
pub struct FileWriterHandle<'a>(&'a FileWriter);

impl Write for FileWriterHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = FileWriterHandle<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriterHandle(self)
    }
}
