//! Rotating file writer plugged into `tracing_subscriber::fmt`

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use super::config::{FileConfig, RotationConfig};
use super::rotation;

/// Appends formatted events to a file and rotates it by size.
///
/// When the file cannot be written (disk full, file removed from under us)
/// output falls back to stderr for the rest of the process.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
}

struct WriterState {
    path: PathBuf,
    rotation: RotationConfig,
    file: BufWriter<File>,
    current_size: u64,
    fallback: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                path: config.path.clone(),
                rotation: config.rotation.clone(),
                file,
                current_size,
                fallback: false,
            })),
        })
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;
        if state.fallback {
            return io::stderr().write(buf);
        }

        let result = state.write_rotating(buf);
        match result {
            Ok(written) => Ok(written),
            Err(e) => {
                state.fallback = true;
                eprintln!(
                    "[logger] writing {} failed, falling back to stderr: {}",
                    state.path.display(),
                    e
                );
                io::stderr().write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock()?;
        if state.fallback {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl WriterState {
    fn write_rotating(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        if self.current_size > 0 && self.current_size + incoming > self.rotation.max_size {
            self.file.flush()?;
            rotation::rotate(&self.path, &self.rotation)?;
            self.file = open_log_file(&self.path, false)?;
            self.current_size = 0;
        }

        self.file.write_all(buf)?;
        // fmt layers emit one event per write call; flush so tailing the file works
        self.file.flush()?;
        self.current_size += incoming;
        Ok(buf.len())
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::rotation::rotated_path;
    use tempfile::tempdir;

    fn file_config(path: PathBuf, max_size: u64, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append,
            rotation: RotationConfig::new(max_size, 3, false).unwrap(),
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/logs/app.log");
        let mut writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, true)).unwrap();

        writer.write_all(b"hello\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_rotates_when_size_exceeded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::new(&file_config(path.clone(), 10, true)).unwrap();

        writer.write_all(b"0123456789").unwrap();
        writer.write_all(b"abc").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc");
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 1, false)).unwrap(),
            "0123456789"
        );
    }

    #[test]
    fn test_oversized_event_is_written_whole() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::new(&file_config(path.clone(), 4, true)).unwrap();

        writer.write_all(b"much longer than four bytes").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "much longer than four bytes"
        );
        assert!(!rotated_path(&path, 1, false).exists());
    }

    #[test]
    fn test_truncates_when_not_appending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old content\n").unwrap();

        let mut writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, false)).unwrap();
        writer.write_all(b"new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_append_counts_existing_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "12345678").unwrap();

        let mut writer = RotatingFileWriter::new(&file_config(path.clone(), 10, true)).unwrap();
        writer.write_all(b"abcd").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abcd");
        assert_eq!(
            std::fs::read_to_string(rotated_path(&path, 1, false)).unwrap(),
            "12345678"
        );
    }
}
