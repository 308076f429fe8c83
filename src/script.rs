//! Loading of user scripts that export filters and builders.
//!
//! A script is a template file whose top-level `{% macro %}` definitions are
//! its exported callables. Each script runs in its own environment, so the
//! names it defines never leak into the templates it serves.
//!
//! Macros are bound to the evaluation that defined them, so every call
//! evaluates the script's top level afresh before invoking the macro. The top
//! level should therefore only define macros, import helpers and `set`
//! constants: anything it renders is discarded, and no state carries over
//! from one call to the next.

use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::filters::register_native_filters;
use log::{debug, info};
use minijinja::{context, path_loader, Environment, ErrorKind, Value};
use regex::Regex;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MACRO_DEFINITION: &str = r"\{%[-+]?\s*macro\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(";

/// Comments and `{% raw %}` blocks, whose content never defines anything.
const INERT_REGION: &str =
    r"(?s)\{#.*?#\}|\{%[-+]?\s*raw\s*[-+]?%\}.*?\{%[-+]?\s*endraw\s*[-+]?%\}";

/// What the callables of a script are used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCategory {
    Filters,
    Builders,
}

impl Display for ScriptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScriptCategory::Filters => "filters",
            ScriptCategory::Builders => "builders",
        };
        write!(f, "{s}")
    }
}

/// A compiled script together with its isolated environment.
#[derive(Debug)]
pub struct Script {
    path: PathBuf,
    key: String,
    env: Environment<'static>,
    exports: Vec<String>,
}

impl Script {
    /// Reads and compiles the script, then evaluates its top level once so
    /// that broken scripts fail here rather than halfway through a build.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let shown = path.display().to_string();
        let load_error = |e: String| Error::ScriptLoadError { path: shown.clone(), e };

        let source = std::fs::read_to_string(&path).map_err(|e| load_error(e.to_string()))?;
        let key = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_slash_string());

        let mut env = Environment::new();
        if let Some(dir) = path.parent() {
            env.set_loader(path_loader(dir));
        }
        register_native_filters(&mut env);
        env.add_template_owned(key.clone(), source).map_err(|e| load_error(e.to_string()))?;

        let mut script = Self { path, key, env, exports: Vec::new() };
        script.exports = script.module_names().map_err(|e| load_error(e.to_string()))?;
        Ok(script)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Names of the macros defined at the top level of this script, in
    /// definition order. Imported macros and plain variables are not included.
    fn module_names(&self) -> Result<Vec<String>, minijinja::Error> {
        let template = self.env.get_template(&self.key)?;
        let module = template.eval_to_state(context! {})?;
        let pattern = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                minijinja::Error::new(ErrorKind::InvalidOperation, "invalid script pattern")
                    .with_source(e)
            })
        };
        let source = pattern(INERT_REGION)?.replace_all(template.source(), "");

        let mut names: Vec<String> = Vec::new();
        for captures in pattern(MACRO_DEFINITION)?.captures_iter(&source) {
            let name = &captures[1];
            if names.iter().any(|known| known == name) {
                continue;
            }
            if module.lookup(name).is_some() {
                names.push(name.to_string());
            } else {
                debug!("Skipping macro not defined at top level: '{name}' in {}", self.path.display());
            }
        }
        Ok(names)
    }

    /// Evaluates the top level, then calls the macro `name` with `args`.
    fn call(&self, name: &str, args: &[Value]) -> Result<Value, minijinja::Error> {
        let template = self.env.get_template(&self.key)?;
        let module = template.eval_to_state(context! {})?;
        let callable = module.lookup(name).ok_or_else(|| {
            minijinja::Error::new(
                ErrorKind::UnknownFunction,
                format!("'{name}' is not defined in {}", self.path.display()),
            )
        })?;
        callable.call(&module, args)
    }
}

/// A callable exported by a script.
#[derive(Debug, Clone)]
pub struct ScriptFunction {
    script: Arc<Script>,
    name: String,
}

impl ScriptFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn script_path(&self) -> &Path {
        self.script.path()
    }

    /// Calls the macro with positional arguments and returns its result.
    pub fn call(&self, args: &[Value]) -> Result<Value, minijinja::Error> {
        self.script.call(&self.name, args)
    }
}

/// Loads the callables a script exports, in definition order.
///
/// No script means no callables.
pub fn load_callables(
    path: Option<&Path>,
    category: ScriptCategory,
) -> Result<Vec<(String, ScriptFunction)>> {
    let Some(path) = path else {
        debug!("No {category} script supplied");
        return Ok(Vec::new());
    };

    let script = Arc::new(Script::load(path)?);
    info!(
        "Loaded {} {category} from {}: {:?}",
        script.exports().len(),
        path.display(),
        script.exports()
    );

    Ok(script
        .exports()
        .iter()
        .map(|name| {
            let function = ScriptFunction { script: Arc::clone(&script), name: name.clone() };
            (name.clone(), function)
        })
        .collect())
}
