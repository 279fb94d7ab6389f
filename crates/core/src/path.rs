//! Path traversal checks for local locators.

use std::path::{Component, Path, PathBuf};

use crate::Error;

const PARENT_TOKEN: &str = "..";

/// Reject paths containing a parent-directory token.
///
/// The raw input is checked first, then the lexically normalized form, so
/// inputs that only reveal `..` after cleaning are also rejected.
pub fn validate_path(path: &Path) -> Result<(), Error> {
    let raw = path.to_string_lossy();
    if raw.contains(PARENT_TOKEN) {
        return Err(Error::PathTraversal(raw.into_owned()));
    }

    if normalize(path).to_string_lossy().contains(PARENT_TOKEN) {
        return Err(Error::PathTraversal(raw.into_owned()));
    }

    Ok(())
}

/// Lexically clean a path: drop `.` components and redundant separators and
/// fold `..` into its parent where one exists. No filesystem access.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
