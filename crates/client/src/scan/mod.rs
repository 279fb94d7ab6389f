//! Local file and directory scanning.
//!
//! Walks a directory depth-first in file-name order and yields files whose
//! extension is in [`TEXT_EXTENSIONS`]. Hidden entries (leading `.`) are
//! skipped and hidden directories are never entered.
//!
//! The walk is a lazy [`ScanIter`] that polls a `CancellationToken` before
//! every entry. Errors on individual entries (permission denied, broken
//! symlinks, loops) are logged and skipped; only a bad root is fatal.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use ragdocs_core::Error;
use ragdocs_core::path::validate_path;
use tokio_util::sync::CancellationToken;
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// Extensions (lowercase, without the dot) treated as text documents.
pub const TEXT_EXTENSIONS: &[&str] = &[
    // prose and markup
    "txt", "md", "markdown", "rst", "adoc", "asciidoc", "tex", "latex", "org", "html", "htm", "xml",
    // data
    "json", "yaml", "yml", "csv", "tsv", "log",
    // configuration
    "conf", "config", "cfg", "ini", "toml",
    // shell
    "sh", "bash", "zsh",
    // source code
    "py", "js", "ts", "go", "java", "c", "cpp", "h", "hpp", "rb", "php", "pl", "lua", "r", "rs",
    // styles and queries
    "css", "scss", "sass", "less", "sql",
];

/// Whether `path` has a text extension (case-insensitive).
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().map(|name| name.starts_with('.')).unwrap_or(false)
}

/// Prunes hidden directories whole, so `.github/workflows/ci.yml` is never
/// yielded even though `ci.yml` itself is not hidden.
fn visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_hidden(entry)
}

type EntryFilter = fn(&DirEntry) -> bool;

/// Lazy directory walk yielding text files.
///
/// Yields `Err(Error::Cancelled)` once and then ends if the token fires.
pub struct ScanIter {
    inner: FilterEntry<walkdir::IntoIter, EntryFilter>,
    cancel: CancellationToken,
    finished: bool,
}

impl Iterator for ScanIter {
    type Item = Result<PathBuf, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if self.cancel.is_cancelled() {
                self.finished = true;
                return Some(Err(Error::Cancelled));
            }

            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    tracing::warn!(path = %path, error = %e, "error accessing path, skipping");
                    continue;
                }
            };

            if entry.file_type().is_file() && is_text_file(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "found text file");
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// Check a root and return an absolute path to it.
fn resolve_root(root: &Path) -> Result<PathBuf, Error> {
    validate_path(root)?;
    let abs = std::path::absolute(root).map_err(|e| Error::io(root, e))?;

    match std::fs::metadata(&abs) {
        Ok(meta) if meta.is_dir() => Ok(abs),
        Ok(_) => Err(Error::NotADirectory(abs)),
        Err(e) if e.kind() == IoErrorKind::NotFound => Err(Error::NotFound(abs)),
        Err(e) => Err(Error::io(abs, e)),
    }
}

/// Start a lazy walk over `root`.
///
/// With `recursive = false` only the direct children of `root` are visited.
///
/// # Errors
///
/// Fails up front if `root` contains `..`, does not exist, is not a
/// directory, or cannot be stat'ed.
pub fn walk(root: &Path, recursive: bool, cancel: CancellationToken) -> Result<ScanIter, Error> {
    let abs = resolve_root(root)?;

    let mut walker = WalkDir::new(abs).min_depth(1).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let filter: EntryFilter = visible;
    Ok(ScanIter { inner: walker.into_iter().filter_entry(filter), cancel, finished: false })
}

/// Collect every text file under `root`.
///
/// Cancellation discards everything found so far.
pub fn scan_directory(root: &Path, recursive: bool, cancel: &CancellationToken) -> Result<Vec<PathBuf>, Error> {
    let files = walk(root, recursive, cancel.clone())?.collect::<Result<Vec<_>, _>>()?;
    tracing::info!(root = %root.display(), recursive, count = files.len(), "scanned directory");
    Ok(files)
}

/// Validate a single file against the text filter and return its absolute path.
pub fn scan_file(path: &Path) -> Result<PathBuf, Error> {
    validate_path(path)?;
    let abs = std::path::absolute(path).map_err(|e| Error::io(path, e))?;

    let meta = match std::fs::metadata(&abs) {
        Ok(meta) => meta,
        Err(e) if e.kind() == IoErrorKind::NotFound => return Err(Error::NotFound(abs)),
        Err(e) => return Err(Error::io(abs, e)),
    };

    if meta.is_dir() {
        return Err(Error::InvalidLocator(format!("{} is a directory, not a file", abs.display())));
    }

    if !is_text_file(&abs) {
        return Err(Error::NotText(abs));
    }

    tracing::debug!(path = %abs.display(), "validated text file");
    Ok(abs)
}
