use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path with the conversions used when naming templates and models.
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use docsmith::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Returns the final component without its extension, lossily converted.
    ///
    /// Empty when the path has no file name (e.g. `..`).
    fn stem_name(&self) -> String;

    /// Joins the normal components of a relative path with `/`, whatever the platform separator is.
    ///
    /// # Examples
    /// ```
    /// use docsmith::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("api").join("class").to_slash_string(), "api/class");
    /// ```
    fn to_slash_string(&self) -> String;

    /// Whether the path has the given extension (without the leading dot).
    fn has_extension(&self, extension: &str) -> bool;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn stem_name(&self) -> String {
        self.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
    }

    fn to_slash_string(&self) -> String {
        self.components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn has_extension(&self, extension: &str) -> bool {
        self.extension().and_then(|ext| ext.to_str()) == Some(extension)
    }
}
