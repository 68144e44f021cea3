//! Disposable sandbox directories seeded from declarative fixtures
//!
//! Every scenario run gets a fresh temporary directory as its whole world.
//! The fixture spec describes what that world contains; nothing inside it
//! survives the run, and nothing outside it may be touched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::common::{slugify, Error, Result};

/// One entry in a fixture: a directory, a text file, or raw bytes
#[derive(Debug, Clone)]
pub enum FixtureEntry {
    Dir { path: String },
    Text { path: String, contents: String },
    Bytes { path: String, contents: Vec<u8> },
}

impl FixtureEntry {
    fn path(&self) -> &str {
        match self {
            FixtureEntry::Dir { path }
            | FixtureEntry::Text { path, .. }
            | FixtureEntry::Bytes { path, .. } => path,
        }
    }
}

/// Declarative description of a sandbox's initial contents
///
/// Paths are relative to the sandbox root. Parent directories of file
/// entries are created implicitly; explicit [`FixtureEntry::Dir`] entries
/// exist for directories that must be present while staying empty.
#[derive(Debug, Clone, Default)]
pub struct FixtureSpec {
    entries: Vec<FixtureEntry>,
}

impl FixtureSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory entry
    pub fn dir(mut self, path: impl Into<String>) -> Self {
        self.entries.push(FixtureEntry::Dir { path: path.into() });
        self
    }

    /// Add a UTF-8 text file entry
    pub fn text(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries.push(FixtureEntry::Text {
            path: path.into(),
            contents: contents.into(),
        });
        self
    }

    /// Add a raw byte file entry
    pub fn bytes(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries.push(FixtureEntry::Bytes {
            path: path.into(),
            contents: contents.into(),
        });
        self
    }

    pub fn entries(&self) -> &[FixtureEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A materialized sandbox; dropping it removes the directory tree
#[derive(Debug)]
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    /// Create a fresh sandbox for `action` and materialize `spec` inside it.
    ///
    /// The directory name carries a slug of the action so that leftover
    /// sandboxes from crashed runs are attributable.
    pub fn enter(action: &str, spec: &FixtureSpec) -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix(&format!("action-diag-{}-", slugify(action)))
            .tempdir()
            .map_err(|e| Error::sandbox_create(action, &e.to_string()))?;

        for entry in spec.entries() {
            materialize(root.path(), entry)?;
        }

        debug!(action, root = %root.path().display(), "sandbox ready");
        Ok(Self { root })
    }

    /// Absolute path of the sandbox root
    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

fn materialize(root: &Path, entry: &FixtureEntry) -> Result<()> {
    let target = checked_path(root, entry.path())?;
    match entry {
        FixtureEntry::Dir { path } => {
            fs::create_dir_all(&target).map_err(|e| Error::fixture(path, &e.to_string()))
        }
        FixtureEntry::Text { path, contents } => {
            write_file(&target, path, contents.as_bytes())
        }
        FixtureEntry::Bytes { path, contents } => write_file(&target, path, contents),
    }
}

fn write_file(target: &Path, declared: &str, contents: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::fixture(declared, &e.to_string()))?;
    }
    fs::write(target, contents).map_err(|e| Error::fixture(declared, &e.to_string()))
}

/// Resolve a declared fixture path, rejecting anything that could land
/// outside the sandbox root.
fn checked_path(root: &Path, declared: &str) -> Result<PathBuf> {
    let relative = Path::new(declared);
    let escapes = declared.is_empty()
        || relative.is_absolute()
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Error::FixturePath(declared.to_string()));
    }
    Ok(root.join(relative))
}
