//! Models: named bundles of templates plus optional filters and builders scripts.

use crate::constants::{
    BUILDERS_SCRIPT, FILTERS_SCRIPT, MANIFEST_FILENAMES, MODELS_DIR, SOURCE_MODELS_DIR,
    TEMPLATES_DIR,
};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::scanner::find_models;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional `model.yaml`/`model.yml`/`model.json` next to a model's templates.
///
/// Paths are relative to the model directory.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ModelManifest {
    #[serde(default)]
    pub templates: Option<PathBuf>,
    #[serde(default)]
    pub filters: Option<PathBuf>,
    #[serde(default)]
    pub builders: Option<PathBuf>,
    /// Output format used when the caller does not pick one.
    #[serde(default)]
    pub format: Option<String>,
}

impl ModelManifest {
    /// Reads the first manifest found in `model_dir`, or an empty one.
    pub fn load<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        for manifest_file_name in MANIFEST_FILENAMES.iter() {
            let manifest_path = model_dir.join(manifest_file_name);
            if manifest_path.is_file() {
                debug!("Reading model manifest {}", manifest_path.display());
                let content = std::fs::read_to_string(&manifest_path)?;
                let manifest = if manifest_path.has_extension("json") {
                    serde_json::from_str(&content)?
                } else {
                    serde_yaml::from_str(&content)?
                };
                return Ok(manifest);
            }
        }
        Ok(Self::default())
    }
}

/// A resolved model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub root: PathBuf,
    pub templates_path: PathBuf,
    pub filters_script: Option<PathBuf>,
    pub builders_script: Option<PathBuf>,
    pub format: Option<String>,
}

impl Model {
    /// Builds a model from its directory, applying the manifest over the conventional layout.
    ///
    /// Conventional scripts are only picked up when they exist; scripts named
    /// by the manifest are kept even when missing so loading reports them.
    pub fn from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let manifest = ModelManifest::load(&root)?;

        let conventional_script = |file_name: &str| {
            let path = root.join(file_name);
            path.is_file().then_some(path)
        };

        Ok(Self {
            name: root.stem_name(),
            templates_path: root.join(manifest.templates.unwrap_or_else(|| TEMPLATES_DIR.into())),
            filters_script: manifest
                .filters
                .map(|path| root.join(path))
                .or_else(|| conventional_script(FILTERS_SCRIPT)),
            builders_script: manifest
                .builders
                .map(|path| root.join(path))
                .or_else(|| conventional_script(BUILDERS_SCRIPT)),
            format: manifest.format,
            root,
        })
    }
}

/// Directory holding the bundled models.
///
/// Installed layouts are looked up next to the running executable first:
/// `<exe dir>/models`, then `<exe dir>/../share/docsmith/models`. Builds run
/// from the source tree fall back to its `models` directory.
pub fn default_models_root() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    locate_models_root(exe_dir.as_deref())
}

fn locate_models_root(exe_dir: Option<&Path>) -> PathBuf {
    exe_dir
        .into_iter()
        .flat_map(|dir| {
            [
                dir.join(MODELS_DIR),
                dir.join("..").join("share").join(env!("CARGO_PKG_NAME")).join(MODELS_DIR),
            ]
        })
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from(SOURCE_MODELS_DIR))
}

/// Whether `model` is written as a path rather than a bare model name.
fn looks_like_path(model: &str) -> bool {
    model.starts_with('.') || model.contains('/') || model.contains(std::path::MAIN_SEPARATOR)
}

/// Resolves `model` to a model directory.
///
/// A bare name that matches one of `available` is that built-in model, even
/// when a directory of the same name exists in the working directory. Strings
/// written as paths (containing a separator or starting with `.`), and bare
/// names that match no built-in model, are used as directories when they exist.
///
/// # Arguments
/// * `model` - Built-in model name or path to a model directory
/// * `available` - Model directories found under the models root
///
/// # Returns
/// * `Result<Model>` - The resolved model, or `ModelNotFoundError`
pub fn resolve_model(model: &str, available: &[PathBuf]) -> Result<Model> {
    if !looks_like_path(model) {
        if let Some(found) = available.iter().find(|candidate| candidate.stem_name() == model) {
            debug!("Using built-in model '{model}' from {}", found.display());
            return Model::from_dir(found);
        }
    }

    let explicit = Path::new(model);
    if explicit.is_dir() {
        debug!("Using model directory {}", explicit.display());
        return Model::from_dir(explicit);
    }

    Err(Error::ModelNotFoundError {
        model: model.to_string(),
        available: available.iter().map(|path| path.stem_name()).collect::<Vec<_>>().join(", "),
    })
}

/// Resolves `model` against the models found under `models_root`.
pub fn find_model<P: AsRef<Path>>(model: &str, models_root: P) -> Result<Model> {
    resolve_model(model, &find_models(models_root)?)
}
