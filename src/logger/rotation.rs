//! Size based log rotation with optional gzip compression

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::config::RotationConfig;

/// `app.log` + 2 → `app.log.2`, or `app.log.2.gz` when compressed
pub(crate) fn rotated_path(base: &Path, index: usize, compressed: bool) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!(".{index}"));
    if compressed {
        name.push(".gz");
    }
    PathBuf::from(name)
}

/// Shift every generation up by one and move `base` into slot 1.
///
/// The caller must have flushed and released its handle on `base`'s contents;
/// the file itself is renamed, not truncated.
pub(crate) fn rotate(base: &Path, config: &RotationConfig) -> io::Result<()> {
    let keep = config.max_files;

    for compressed in [false, true] {
        remove_if_exists(&rotated_path(base, keep, compressed))?;
    }

    for index in (1..keep).rev() {
        for compressed in [false, true] {
            let from = rotated_path(base, index, compressed);
            if from.exists() {
                fs::rename(&from, rotated_path(base, index + 1, compressed))?;
            }
        }
    }

    if base.exists() {
        let first = rotated_path(base, 1, false);
        fs::rename(base, &first)?;
        if config.compress {
            compress_file(&first)?;
        }
    }

    Ok(())
}

/// Gzip `path` into `<path>.gz` and remove the original.
fn compress_file(path: &Path) -> io::Result<PathBuf> {
    let mut compressed_name = OsString::from(path.as_os_str());
    compressed_name.push(".gz");
    let compressed_path = PathBuf::from(compressed_name);

    let mut input = BufReader::new(File::open(path)?);
    let output = BufWriter::new(File::create(&compressed_path)?);
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(compressed_path)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    fn config(max_files: usize, compress: bool) -> RotationConfig {
        RotationConfig::new(1024, max_files, compress).unwrap()
    }

    #[test]
    fn test_rotated_path_naming() {
        let base = Path::new("/var/log/pushgate.log");
        assert_eq!(
            rotated_path(base, 3, false),
            PathBuf::from("/var/log/pushgate.log.3")
        );
        assert_eq!(
            rotated_path(base, 1, true),
            PathBuf::from("/var/log/pushgate.log.1.gz")
        );
    }

    #[test]
    fn test_rotate_shifts_generations() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");

        for round in 0..3 {
            fs::write(&base, format!("round {round}")).unwrap();
            rotate(&base, &config(5, false)).unwrap();
        }

        assert!(!base.exists());
        assert_eq!(fs::read_to_string(rotated_path(&base, 1, false)).unwrap(), "round 2");
        assert_eq!(fs::read_to_string(rotated_path(&base, 2, false)).unwrap(), "round 1");
        assert_eq!(fs::read_to_string(rotated_path(&base, 3, false)).unwrap(), "round 0");
    }

    #[test]
    fn test_rotate_prunes_beyond_max_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");

        for round in 0..5 {
            fs::write(&base, format!("round {round}")).unwrap();
            rotate(&base, &config(2, false)).unwrap();
        }

        assert_eq!(fs::read_to_string(rotated_path(&base, 1, false)).unwrap(), "round 4");
        assert_eq!(fs::read_to_string(rotated_path(&base, 2, false)).unwrap(), "round 3");
        assert!(!rotated_path(&base, 3, false).exists());
    }

    #[test]
    fn test_rotate_with_compression() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");
        fs::write(&base, "line one\nline two\n").unwrap();

        rotate(&base, &config(3, true)).unwrap();

        assert!(!rotated_path(&base, 1, false).exists());
        let mut decoder = GzDecoder::new(File::open(rotated_path(&base, 1, true)).unwrap());
        let mut content = String::new();
        decoder.read_to_string(&mut content).unwrap();
        assert_eq!(content, "line one\nline two\n");

        fs::write(&base, "next").unwrap();
        rotate(&base, &config(3, true)).unwrap();
        assert!(rotated_path(&base, 2, true).exists());
        assert!(rotated_path(&base, 1, true).exists());
    }

    #[test]
    fn test_rotate_without_base_file_is_noop() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("missing.log");
        assert!(rotate(&base, &config(3, false)).is_ok());
        assert!(!rotated_path(&base, 1, false).exists());
    }
}
