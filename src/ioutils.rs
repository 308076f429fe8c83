use std::path::{Path, PathBuf};

use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating missing parent directories.
///
/// The write is a plain overwrite, so re-running a construction replaces earlier output.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let base_path = std::env::current_dir().unwrap_or_default();
    let abs_path = if dest_path.is_absolute() {
        dest_path.to_path_buf()
    } else {
        base_path.join(dest_path)
    };

    if let Some(parent) = abs_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

/// Path of the document `<dir>/<stem>.<format>`.
pub fn output_file_path<P: AsRef<Path>>(dir: P, stem: &str, format: &str) -> PathBuf {
    dir.as_ref().join(format!("{stem}.{format}"))
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Reads a JSON documentation context from a file, or from stdin when `source` is `-`.
pub fn read_context(source: &str) -> Result<serde_json::Value> {
    let buf = if source == STDIN_INDICATOR {
        read_from(std::io::stdin())?
    } else {
        std::fs::read_to_string(source)?
    };
    let context: serde_json::Value = serde_json::from_str(&buf)?;
    if !context.is_object() {
        return Err(Error::ContextError(format!(
            "expected a JSON object in '{source}'"
        )));
    }
    Ok(context)
}
