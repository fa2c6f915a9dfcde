//! Input resolution.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Expands the task's input path into file items. Patterns containing glob
//! characters (`*`, `?`, `[`) are expanded with `glob`; anything else is
//! treated as a literal path that must exist.

use std::fs;
use std::path::{Path, PathBuf};

use sassbundle_pipeline::{FileItem, PipelineError};

const STAGE: &str = "source";

/// Expand `pattern` into file items, in deterministic (sorted) order.
///
/// Each item's base is the pattern's non-wildcard directory prefix (the
/// file's parent for literal paths), so nested matches keep their relative
/// structure within the stream.
///
/// # Errors
///
/// Fails on an invalid pattern, an unreadable match, or a literal path
/// that does not exist. A pattern that matches nothing is not an error:
/// it warns and yields no items.
pub fn resolve(pattern: &str) -> Result<Vec<FileItem>, PipelineError> {
    if is_glob(pattern) {
        resolve_glob(pattern)
    } else {
        resolve_literal(Path::new(pattern))
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

fn resolve_literal(path: &Path) -> Result<Vec<FileItem>, PipelineError> {
    if !path.is_file() {
        return Err(PipelineError::stage(
            STAGE,
            format!("file not found: {}", path.display()),
        ));
    }

    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf());
    let contents = fs::read(path)?;

    Ok(vec![FileItem::new(base, name, contents)])
}

fn resolve_glob(pattern: &str) -> Result<Vec<FileItem>, PipelineError> {
    let base = glob_base(pattern);
    let paths = glob::glob(pattern).map_err(|e| {
        PipelineError::stage(STAGE, format!("invalid glob pattern '{pattern}': {e}"))
    })?;

    let mut items = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            PipelineError::stage(STAGE, format!("unreadable match for '{pattern}': {e}"))
        })?;
        if !path.is_file() {
            continue;
        }
        let name = path.strip_prefix(&base).unwrap_or(&path).to_path_buf();
        let contents = fs::read(&path)?;
        items.push(FileItem::new(base.clone(), name, contents));
    }

    if items.is_empty() {
        tracing::warn!(pattern, "no files matched pattern");
    }

    Ok(items)
}

/// Directory prefix of `pattern` up to the first component containing a
/// glob character.
fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains('*') || text.contains('?') || text.contains('[') {
            break;
        }
        base.push(component);
    }

    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}
