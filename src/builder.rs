//! Builders decide how many documents a template produces and how they are named.

use crate::constants::builders::{CLASS, INDEX};
use crate::error::{Error, Result};
use crate::ioutils::{output_file_path, write_file};
use crate::renderer::objects::OutputObject;
use crate::renderer::TemplateHandle;
use crate::script::ScriptFunction;
use indexmap::IndexMap;
use log::debug;
use minijinja::Value;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// `(format, template, context, output_dir)`; writes zero or more documents under `output_dir`.
pub type BuilderFn =
    Arc<dyn Fn(&str, &TemplateHandle<'_>, &serde_json::Value, &Path) -> Result<()> + Send + Sync>;

/// Renders `template` once with the whole context into `<path>/<name>.<format>`.
pub fn build_template(
    name: &str,
    format: &str,
    template: &TemplateHandle<'_>,
    context: &serde_json::Value,
    path: &Path,
) -> Result<()> {
    let content = template.render(context)?;
    let dest = output_file_path(path, name, format);
    debug!("Writing {} from template '{}'", dest.display(), template.name());
    write_file(&content, dest)
}

/// Renders `template` once per class record with `{class: record}`, into
/// `<path>/<lowercased class name>.<format>`.
pub fn build_class_templates(
    format: &str,
    template: &TemplateHandle<'_>,
    context: &serde_json::Value,
    path: &Path,
) -> Result<()> {
    let classes = context.get("classes").and_then(|classes| classes.as_array()).ok_or_else(
        || Error::ContextError("'classes' must be a sequence of class records".into()),
    )?;

    for class in classes {
        let name = class.get("name").and_then(|name| name.as_str()).ok_or_else(|| {
            Error::ContextError("every class record needs a string 'name'".into())
        })?;
        build_template(&name.to_lowercase(), format, template, &json!({ "class": class }), path)?;
    }
    Ok(())
}

/// Renders `template` once with the whole context into `<path>/index.<format>`.
pub fn build_index_template(
    format: &str,
    template: &TemplateHandle<'_>,
    context: &serde_json::Value,
    path: &Path,
) -> Result<()> {
    build_template(INDEX, format, template, context, path)
}

/// Wraps a builder macro `(format, template, context, output)` as a builder.
pub fn script_builder(function: ScriptFunction) -> BuilderFn {
    Arc::new(
        move |format: &str,
              template: &TemplateHandle<'_>,
              context: &serde_json::Value,
              path: &Path|
              -> Result<()> {
            let args = [
                Value::from(format),
                template.to_value(),
                Value::from_serialize(context),
                Value::from_object(OutputObject::new(path, format)),
            ];
            function.call(&args)?;
            Ok(())
        },
    )
}

/// Builders by template name: user builders first, then the defaults.
#[derive(Clone)]
pub struct BuilderRegistry {
    user: IndexMap<String, BuilderFn>,
    defaults: IndexMap<String, BuilderFn>,
}

impl BuilderRegistry {
    /// A registry holding only the `class` and `index` defaults.
    pub fn new() -> Self {
        let mut defaults: IndexMap<String, BuilderFn> = IndexMap::new();
        defaults.insert(CLASS.to_string(), Arc::new(build_class_templates));
        defaults.insert(INDEX.to_string(), Arc::new(build_index_template));
        Self { user: IndexMap::new(), defaults }
    }

    /// Registers a user builder, shadowing a default or earlier builder of the same name.
    ///
    /// # Arguments
    /// * `name` - Logical name of the template the builder handles
    /// * `builder` - The builder function
    ///
    /// # Examples
    /// ```
    /// use docsmith::builder::{build_template, BuilderFn, BuilderRegistry};
    /// use docsmith::renderer::TemplateHandle;
    /// use std::path::Path;
    /// use std::sync::Arc;
    ///
    /// let changelog: BuilderFn = Arc::new(
    ///     |format: &str, template: &TemplateHandle<'_>, context: &serde_json::Value, path: &Path| {
    ///         build_template("CHANGELOG", format, template, context, path)
    ///     },
    /// );
    /// let mut registry = BuilderRegistry::new();
    /// registry.register("changelog", changelog);
    /// assert_eq!(registry.names(), ["changelog", "class", "index"]);
    /// ```
    pub fn register<N: Into<String>>(&mut self, name: N, builder: BuilderFn) {
        self.user.insert(name.into(), builder);
    }

    /// Registers every builder macro of a script under its own name.
    pub fn register_scripts(&mut self, builders: Vec<(String, ScriptFunction)>) {
        for (name, function) in builders {
            debug!("Registering builder '{name}' from {}", function.script_path().display());
            self.register(name, script_builder(function));
        }
    }

    /// The builder for a template, if any. Templates without one produce no output.
    pub fn resolve(&self, name: &str) -> Option<&BuilderFn> {
        self.user.get(name).or_else(|| self.defaults.get(name))
    }

    /// Whether a template of this name has a builder.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Every resolvable name, user builders first.
    pub fn names(&self) -> Vec<&str> {
        self.user
            .keys()
            .chain(self.defaults.keys().filter(|name| !self.user.contains_key(*name)))
            .map(String::as_str)
            .collect()
    }

    /// Number of resolvable names.
    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderRegistry").field("builders", &self.names()).finish()
    }
}
