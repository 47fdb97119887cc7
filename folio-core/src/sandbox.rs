//! Directory sandbox: confines navigation and file reads to a root directory.
//!
//! The session never touches absolute paths. It holds a [`WorkDir`], the list
//! of segments below the root, and every `cd`/`cat`/`ls` goes through
//! [`Sandbox`], which rejects hidden entries and anything that would resolve
//! above the root. The backing store sits behind the [`Filesystem`] trait.

use crate::error::{PathKind, Result, ShellError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A single directory entry as reported by the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Backing store for the sandbox. Paths are relative to the sandbox root.
pub trait Filesystem: Send + Sync {
    fn list(&self, path: &Path) -> io::Result<Vec<Entry>>;
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn is_dir(&self, path: &Path) -> bool;
    /// Human-readable location of the root, for logging.
    fn root(&self) -> &Path;
}

/// The real filesystem under a canonicalized root.
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// Join `rel` onto the root and make sure the result does not leave it
    /// (symlinks included).
    fn inside(&self, rel: &Path) -> io::Result<PathBuf> {
        let canonical = self.root.join(rel).canonicalize()?;
        if canonical.starts_with(&self.root) {
            Ok(canonical)
        } else {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "path escapes the sandbox root",
            ))
        }
    }
}

impl Filesystem for LocalFs {
    fn list(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let dir = self.inside(path)?;
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.path().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.inside(path)?)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inside(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// Current directory of a session, as segments below the sandbox root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkDir {
    segments: Vec<String>,
}

impl WorkDir {
    /// The sandbox root itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path relative to the sandbox root (`.` for the root).
    pub fn relative(&self) -> PathBuf {
        if self.segments.is_empty() {
            PathBuf::from(".")
        } else {
            self.segments.iter().collect()
        }
    }

    /// Relative path of `name` inside this directory.
    pub fn join(&self, name: &str) -> PathBuf {
        let mut path = self.relative();
        for segment in name.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }
}

impl std::fmt::Display for WorkDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "~")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Validates navigation and reads against a [`Filesystem`].
#[derive(Clone)]
pub struct Sandbox {
    fs: Arc<dyn Filesystem>,
}

impl Sandbox {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Sandbox over the local filesystem rooted at `root`.
    pub fn local(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(LocalFs::new(root)?)))
    }

    pub fn root(&self) -> &Path {
        self.fs.root()
    }

    /// Resolve a `cd` target against `current`.
    pub fn resolve(&self, current: &WorkDir, target: &str) -> Result<WorkDir> {
        if target == ".." {
            return Ok(current.parent());
        }
        if target.starts_with('.') {
            debug!(dir = target, "Denied hidden directory");
            return Err(ShellError::HiddenPathDenied {
                kind: PathKind::Directory,
            });
        }

        let segments = split_segments(target, PathKind::Directory)?;
        if segments.is_empty() {
            return Err(ShellError::InvalidPath {
                target: target.to_string(),
            });
        }

        let mut candidate = current.clone();
        candidate.segments.extend(segments);
        if self.fs.is_dir(&candidate.relative()) {
            Ok(candidate)
        } else {
            Err(ShellError::InvalidPath {
                target: target.to_string(),
            })
        }
    }

    /// Read a file below `current`. Hidden names are rejected before any I/O.
    pub fn read_file(&self, current: &WorkDir, name: &str) -> Result<Vec<u8>> {
        if name.starts_with('.') {
            debug!(file = name, "Denied hidden file");
            return Err(ShellError::HiddenPathDenied {
                kind: PathKind::File,
            });
        }
        let segments = split_segments(name, PathKind::File)?;
        let path = current.join(name);
        if segments.is_empty() {
            return Err(ShellError::ReadFailed {
                path,
                source: io::Error::new(io::ErrorKind::InvalidInput, "no file name given"),
            });
        }
        self.fs
            .read_file(&path)
            .map_err(|source| ShellError::ReadFailed { path, source })
    }

    /// Non-hidden entries of `current`, sorted by name.
    pub fn list(&self, current: &WorkDir) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self
            .fs
            .list(&current.relative())?
            .into_iter()
            .filter(|e| !e.is_hidden())
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Split a `/`-separated target, dropping empty segments and refusing any
/// dot-prefixed one (`..` included).
fn split_segments(target: &str, kind: PathKind) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    for segment in target.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('.') {
            return Err(ShellError::HiddenPathDenied { kind });
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}
