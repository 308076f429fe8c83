//! Discovery of models and templates on disk.

use crate::constants::{INDEX_TEMPLATE, TEMPLATE_EXTENSION};
use crate::error::Result;
use crate::ext::PathExt;
use crate::ignore::{build_ignore_globset, is_ignored};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How a template is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `<name>.jinja`
    File,
    /// `<name>/index.jinja`, possibly next to partials it includes
    Folder,
}

/// A template discovered under a templates root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Logical name builders are looked up by.
    pub name: String,
    /// The template file, or the folder for folder-style templates.
    pub path: PathBuf,
    pub kind: TemplateKind,
}

impl TemplateEntry {
    /// The file the template body is read from.
    pub fn source_file(&self) -> PathBuf {
        match self.kind {
            TemplateKind::File => self.path.clone(),
            TemplateKind::Folder => self.path.join(index_file_name()),
        }
    }
}

fn index_file_name() -> String {
    format!("{INDEX_TEMPLATE}.{TEMPLATE_EXTENSION}")
}

/// Immediate children of `root` that survive the ignore rules, ordered by file name.
///
/// A missing or unreadable root yields no entries.
fn list_children(root: &Path) -> Result<Vec<PathBuf>> {
    let ignored = build_ignore_globset()?;
    Ok(WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let skip = is_ignored(&ignored, path);
            if skip {
                debug!("Ignoring reserved entry: {}", path.display());
            }
            !skip
        })
        .collect())
}

/// Lists the model directories directly under `root`.
pub fn find_models<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let models: Vec<PathBuf> =
        list_children(root.as_ref())?.into_iter().filter(|path| path.is_dir()).collect();
    debug!("Found {} model(s) in {}", models.len(), root.as_ref().display());
    Ok(models)
}

/// Lists the templates directly under `root`.
///
/// Files count when they carry the template extension; folders count only
/// when they contain an `index` template. Everything else is skipped.
pub fn find_templates<P: AsRef<Path>>(root: P) -> Result<Vec<TemplateEntry>> {
    let root = root.as_ref();
    let templates: Vec<TemplateEntry> = list_children(root)?
        .into_iter()
        .filter_map(|path| {
            if path.is_dir() {
                if path.join(index_file_name()).is_file() {
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    Some(TemplateEntry { name, path, kind: TemplateKind::Folder })
                } else {
                    debug!("Skipping folder without index template: {}", path.display());
                    None
                }
            } else if path.has_extension(TEMPLATE_EXTENSION) {
                Some(TemplateEntry { name: path.stem_name(), path, kind: TemplateKind::File })
            } else {
                debug!("Skipping non-template file: {}", path.display());
                None
            }
        })
        .collect();
    debug!("Found {} template(s) in {}", templates.len(), root.display());
    Ok(templates)
}
