//! Size-rotated append-only file.
//!
//! When the next line would push the active file past its limit, the file is
//! shifted to `<name>.1`, earlier backups move up by one, and anything past
//! the retention count is removed.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default rotation threshold (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated files kept.
pub const MAX_BACKUPS: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Option<File>,
    size: u64,
}

impl RotatingFile {
    /// Opens lazily on first write.
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_BYTES, MAX_BACKUPS)
    }

    pub fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: None,
            size: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let len = line.len() as u64 + 1;

        if self.file.is_none() {
            self.open()?;
        }
        if self.size > 0 && self.size + len > self.max_bytes {
            self.rotate()?;
            self.open()?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        self.size += len;
        Ok(())
    }

    fn open(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.size = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;

        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = self.backup(n);
            if from.exists() {
                fs::rename(&from, self.backup(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1))
    }

    fn backup(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_until_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut file = RotatingFile::with_limits(path.clone(), 64, 2);
        file.write_line("one").unwrap();
        file.write_line("two").unwrap();
        assert_eq!(read(&path), "one\ntwo\n");
        assert!(!dir.path().join("trace.json.1").exists());
    }

    #[test]
    fn rotates_and_keeps_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut file = RotatingFile::with_limits(path.clone(), 16, 2);
        for n in 1..=4 {
            file.write_line(&format!("line-{n}-abc")).unwrap();
        }

        assert_eq!(read(&path), "line-4-abc\n");
        assert_eq!(read(&dir.path().join("trace.json.1")), "line-3-abc\n");
        assert_eq!(read(&dir.path().join("trace.json.2")), "line-2-abc\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }

    #[test]
    fn resumes_existing_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, "0123456789\n").unwrap();

        let mut file = RotatingFile::with_limits(path.clone(), 16, 1);
        file.write_line("next-line").unwrap();
        assert_eq!(read(&path), "next-line\n");
        assert_eq!(read(&dir.path().join("trace.json.1")), "0123456789\n");
    }
}
