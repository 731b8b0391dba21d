//! Output persistence: write the final PNG under a unique name, falling back
//! to a secondary directory, and remember where each file actually landed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::Digest as _;
use tracing::{info, warn};

use crate::foundation::error::{PinError, PinResult};

/// Addressable reference to a stored render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    pub path: PathBuf,
}

/// Filesystem sink with a fallback location and an explicit filename→path
/// registry. When the output directory varies by environment, the registry
/// is what later lookups consult; it is owned here, not ambient state.
pub struct OutputSink {
    primary: PathBuf,
    fallback: PathBuf,
    registry: HashMap<String, PathBuf>,
}

impl OutputSink {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
            registry: HashMap::new(),
        }
    }

    /// Persist PNG bytes under a fresh `generated_<unix-time>_<8 hex>.png`
    /// name. Tries the primary directory, then the fallback.
    pub fn store(&mut self, png: &[u8]) -> PinResult<StoredImage> {
        let filename = generate_filename();

        match write_to(&self.primary, &filename, png) {
            Ok(path) => {
                info!(path = %path.display(), "stored output image");
                self.registry.insert(filename.clone(), path.clone());
                Ok(StoredImage { filename, path })
            }
            Err(primary_err) => {
                warn!(
                    dir = %self.primary.display(),
                    %primary_err,
                    "primary output dir not writable, trying fallback"
                );
                let path = write_to(&self.fallback, &filename, png).map_err(|fallback_err| {
                    PinError::storage(format!(
                        "could not write output to {} ({primary_err}) or {} ({fallback_err})",
                        self.primary.display(),
                        self.fallback.display()
                    ))
                })?;
                info!(path = %path.display(), "stored output image in fallback dir");
                self.registry.insert(filename.clone(), path.clone());
                Ok(StoredImage { filename, path })
            }
        }
    }

    /// Where a previously stored filename actually lives.
    pub fn lookup(&self, filename: &str) -> Option<&Path> {
        self.registry.get(filename).map(PathBuf::as_path)
    }

    pub fn primary_dir(&self) -> &Path {
        &self.primary
    }

    pub fn fallback_dir(&self) -> &Path {
        &self.fallback
    }
}

fn write_to(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

fn generate_filename() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("generated_{}_{}.png", now.as_secs(), hex_nonce(8))
}

/// A fresh hex nonce of `len` characters, derived from wall-clock nanos and
/// the process id. Only filenames and task ids consume this; pixel output
/// never depends on it.
pub(crate) fn hex_nonce(len: usize) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mut hasher = sha2::Sha256::new();
    hasher.update(now.as_nanos().to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = hasher.finalize();
    let mut s = hex::encode(digest);
    s.truncate(len);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_matches_expected_shape() {
        let name = generate_filename();
        assert!(name.starts_with("generated_"));
        assert!(name.ends_with(".png"));
        let middle = name
            .strip_prefix("generated_")
            .and_then(|s| s.strip_suffix(".png"))
            .unwrap();
        let (secs, nonce) = middle.split_once('_').unwrap();
        assert!(secs.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(nonce.len(), 8);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn store_writes_and_registers() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path().join("out"), dir.path().join("fb"));
        let stored = sink.store(b"png-bytes").unwrap();
        assert!(stored.path.exists());
        assert_eq!(sink.lookup(&stored.filename), Some(stored.path.as_path()));
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"png-bytes");
    }

    #[test]
    fn store_falls_back_when_primary_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is expected makes the primary unusable.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, b"x").unwrap();
        let mut sink = OutputSink::new(&blocked, dir.path().join("fb"));
        let stored = sink.store(b"data").unwrap();
        assert!(stored.path.starts_with(dir.path().join("fb")));
    }

    #[test]
    fn store_errors_when_both_locations_fail() {
        let dir = tempfile::tempdir().unwrap();
        let blocked_a = dir.path().join("a");
        let blocked_b = dir.path().join("b");
        std::fs::write(&blocked_a, b"x").unwrap();
        std::fs::write(&blocked_b, b"x").unwrap();
        let mut sink = OutputSink::new(&blocked_a, &blocked_b);
        let err = sink.store(b"data").unwrap_err();
        assert!(err.to_string().contains("storage error:"));
    }

    #[test]
    fn lookup_unknown_is_none() {
        let sink = OutputSink::new("a", "b");
        assert!(sink.lookup("generated_0_deadbeef.png").is_none());
    }
}
