use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

/// Builds the set of reserved entry names (hidden entries, bytecode caches)
/// that never count as models or templates.
pub fn build_ignore_globset() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Whether the final component of `path` matches one of the ignore patterns.
pub fn is_ignored(ignored: &GlobSet, path: &Path) -> bool {
    path.file_name().is_some_and(|name| ignored.is_match(name))
}
