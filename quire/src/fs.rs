//! File system-related utilities.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use eyre::{Result, WrapErr};
use log::debug;

use crate::Error;

/// Canonicalize the given path if it exists. If it does not exist, returns
/// `Ok(None)`.
pub fn maybe_canonicalize<P>(path: P) -> Result<Option<PathBuf>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        Ok(Some(path.canonicalize()?))
    } else {
        Ok(None)
    }
}

/// Removes `.` and `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Resolves `path` to an absolute path with symlinks resolved, even if the
/// path (or some of its ancestors) does not exist yet.
///
/// `..` is applied lexically before any symlinks are resolved.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&std::env::current_dir()?.join(path))
    };
    for ancestor in absolute.ancestors() {
        if let Some(canonical) = maybe_canonicalize(ancestor)? {
            return Ok(canonical.join(absolute.strip_prefix(ancestor)?));
        }
    }
    Ok(absolute)
}

/// Creates the given directory and all of its missing ancestors. Returns
/// whether or not anything had to be created.
pub fn ensure_path_exists(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).wrap_err_with(|| Error::FailedToCreateDir(path.to_path_buf()))?;
    debug!("Created path: {}", path.display());
    Ok(true)
}

pub fn ensure_parent_path_exists(path: &Path) -> Result<bool> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::PathMissingParent(path.to_path_buf()))?;
    ensure_path_exists(parent)
}

/// Case-insensitive check of a path's extension (given without the leading
/// dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |e| e.eq_ignore_ascii_case(ext))
}
