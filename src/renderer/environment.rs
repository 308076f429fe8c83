//! The template environment builders render with.

use super::filters::register_native_filters;
use super::objects::TemplateObject;
use crate::constants::{INDEX_TEMPLATE, TEMPLATE_EXTENSION};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::scanner::TemplateEntry;
use crate::script::ScriptFunction;
use log::debug;
use minijinja::value::Rest;
use minijinja::{Environment, ErrorKind, Template, Value};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Resolves a logical template name against the templates root.
///
/// `name` maps to `name.jinja`, then `name/index.jinja`, then `name` itself so
/// templates can include partials by their file name.
fn logical_name_loader(
    root: PathBuf,
) -> impl Fn(&str) -> Result<Option<String>, minijinja::Error> + Send + Sync + 'static {
    move |name: &str| {
        let is_relative = Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if name.is_empty() || !is_relative {
            return Ok(None);
        }

        let candidates = [
            root.join(format!("{name}.{TEMPLATE_EXTENSION}")),
            root.join(name).join(format!("{INDEX_TEMPLATE}.{TEMPLATE_EXTENSION}")),
            root.join(name),
        ];
        for candidate in candidates {
            if candidate.is_file() {
                debug!("Loading template '{name}' from {}", candidate.display());
                return std::fs::read_to_string(&candidate).map(Some).map_err(|err| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("could not read template {}", candidate.display()),
                    )
                    .with_source(err)
                });
            }
        }
        Ok(None)
    }
}

/// The templating environment for one templates root.
///
/// Templates are addressed by logical name and loaded lazily from the root.
/// Native case filters are always registered; script filters are added with
/// [`TemplateEnvironment::register_filters`].
///
/// # Examples
/// ```
/// use docsmith::renderer::TemplateEnvironment;
///
/// let mut env = TemplateEnvironment::new("templates");
/// env.add_template("greeting", "Hello, {{ name | pascal_case }}!").unwrap();
/// let greeting = env.get("greeting").unwrap();
/// let rendered = greeting.render(serde_json::json!({"name": "node path"})).unwrap();
/// assert_eq!(rendered, "Hello, NodePath!");
/// ```
pub struct TemplateEnvironment {
    env: Environment<'static>,
    templates_root: PathBuf,
}

impl TemplateEnvironment {
    /// Creates an environment loading templates from `templates_root`.
    ///
    /// The root does not have to exist; lookups then simply find nothing.
    pub fn new<P: Into<PathBuf>>(templates_root: P) -> Self {
        let templates_root = templates_root.into();
        let mut env = Environment::new();
        env.set_loader(logical_name_loader(templates_root.clone()));
        register_native_filters(&mut env);
        Self { env, templates_root }
    }

    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }

    /// The underlying minijinja environment.
    pub fn env(&self) -> &Environment<'static> {
        &self.env
    }

    /// Adds an in-memory template, taking precedence over files with the same logical name.
    ///
    /// # Arguments
    /// * `name` - Logical name; `\` separators are normalised to `/`
    /// * `source` - Template source
    ///
    /// # Returns
    /// * `Result<()>` - Fails when the source does not compile
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        let normalized_name = name.replace('\\', "/");
        self.env.add_template_owned(normalized_name, source.to_string())?;
        Ok(())
    }

    /// Registers script filters by name. A later filter replaces an earlier one with the same name.
    ///
    /// Script filters also replace native filters of the same name.
    ///
    /// # Arguments
    /// * `filters` - `(name, function)` pairs as returned by [`crate::script::load_callables`]
    ///
    /// # Returns
    /// * `&mut Self` - The environment, for chaining
    pub fn register_filters(&mut self, filters: &[(String, ScriptFunction)]) -> &mut Self {
        for (name, function) in filters {
            debug!("Registering filter '{name}' from {}", function.script_path().display());
            let function = function.clone();
            self.env.add_filter(name.clone(), move |args: Rest<Value>| function.call(&args.0));
        }
        self
    }

    /// Compiles the template behind a discovered entry.
    pub fn compile(&self, entry: &TemplateEntry) -> Result<TemplateHandle<'_>> {
        self.get(&entry.name)
    }

    /// Compiles a template by logical name.
    ///
    /// # Arguments
    /// * `name` - `name` resolves to `name.jinja`, then `name/index.jinja`, then `name`
    ///
    /// # Returns
    /// * `Result<TemplateHandle>` - The compiled template, or a minijinja error when
    ///   it is missing or does not compile
    pub fn get(&self, name: &str) -> Result<TemplateHandle<'_>> {
        let template = self.env.get_template(name)?;
        Ok(TemplateHandle { env: &self.env, template })
    }

    /// Logical name of a template path: relative to the templates root,
    /// without extension, `/`-separated.
    ///
    /// # Arguments
    /// * `path` - A path under the templates root
    ///
    /// # Returns
    /// * `Result<String>` - `TemplateError` when `path` is outside the root
    pub fn template_name<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let relative = path.strip_prefix(&self.templates_root).map_err(|_| {
            Error::TemplateError(format!(
                "'{}' is outside of templates root '{}'",
                path.display(),
                self.templates_root.display()
            ))
        })?;
        Ok(relative.with_extension("").to_slash_string())
    }
}

/// A compiled template ready to be rendered by a builder.
pub struct TemplateHandle<'env> {
    env: &'env Environment<'static>,
    template: Template<'env, 'env>,
}

impl TemplateHandle<'_> {
    /// Logical name the template was compiled under.
    pub fn name(&self) -> &str {
        self.template.name()
    }

    /// Renders the template with `context`.
    pub fn render<S: Serialize>(&self, context: S) -> Result<String> {
        Ok(self.template.render(context)?)
    }

    /// The template as a value builder scripts can call `render` on.
    pub fn to_value(&self) -> Value {
        Value::from_object(TemplateObject::new(self.env.clone(), self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{load_callables, ScriptCategory};
    use serde_json::json;
    use std::fs;

    fn environment_with(files: &[(&str, &str)]) -> (tempfile::TempDir, TemplateEnvironment) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("templates");
        for (name, content) in files {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let env = TemplateEnvironment::new(root);
        (tmp, env)
    }

    #[test]
    fn compiles_files_and_folders_by_logical_name() {
        let (_tmp, env) = environment_with(&[
            ("class.jinja", "{{ class.name }}"),
            ("guide/index.jinja", "{% include 'guide/intro.jinja' %}!"),
            ("guide/intro.jinja", "intro"),
        ]);

        let class = env.get("class").unwrap();
        assert_eq!(class.name(), "class");
        assert_eq!(class.render(json!({"class": {"name": "Node"}})).unwrap(), "Node");

        let guide = env.get("guide").unwrap();
        assert_eq!(guide.render(json!({})).unwrap(), "intro!");
    }

    #[test]
    fn compile_resolves_discovered_entries() {
        let (_tmp, env) = environment_with(&[("api/index.jinja", "api")]);
        let entries = crate::scanner::find_templates(env.templates_root()).unwrap();
        let handle = env.compile(&entries[0]).unwrap();
        assert_eq!(handle.render(json!({})).unwrap(), "api");
    }

    #[test]
    fn unknown_and_escaping_names_do_not_resolve() {
        let (_tmp, env) = environment_with(&[("class.jinja", "x")]);
        assert!(env.get("missing").is_err());
        assert!(env.get("../templates/class").is_err());
    }

    #[test]
    fn template_name_is_relative_without_extension() {
        let (_tmp, env) = environment_with(&[]);
        let root = env.templates_root().to_path_buf();
        assert_eq!(env.template_name(root.join("custom_template")).unwrap(), "custom_template");
        assert_eq!(
            env.template_name(root.join("nested").join("page.jinja")).unwrap(),
            "nested/page"
        );
        assert!(env.template_name("/elsewhere/page.jinja").is_err());
    }

    #[test]
    fn registered_filters_are_usable_in_templates() {
        let (tmp, mut env) =
            environment_with(&[("index.jinja", "{{ 'node' | shout }} {{ 'a' | wrap('[', ']') }}")]);
        let script = tmp.path().join("filters.jinja");
        fs::write(
            &script,
            "{% macro shout(value) %}{{ value | upper }}!{% endmacro %}\
             {% macro wrap(value, left, right) %}{{ left }}{{ value }}{{ right }}{% endmacro %}",
        )
        .unwrap();

        let filters = load_callables(Some(&script), ScriptCategory::Filters).unwrap();
        env.register_filters(&filters);

        let index = env.get("index").unwrap();
        assert_eq!(index.render(json!({})).unwrap(), "NODE! [a]");
    }

    #[test]
    fn script_filters_override_native_ones() {
        let (tmp, mut env) = environment_with(&[("index.jinja", "{{ 'Node' | snake_case }}")]);
        let script = tmp.path().join("filters.jinja");
        fs::write(&script, "{% macro snake_case(value) %}custom{% endmacro %}").unwrap();

        let filters = load_callables(Some(&script), ScriptCategory::Filters).unwrap();
        env.register_filters(&filters);

        assert_eq!(env.get("index").unwrap().render(json!({})).unwrap(), "custom");
    }

    #[test]
    fn in_memory_templates_take_precedence() {
        let (_tmp, mut env) = environment_with(&[("index.jinja", "file")]);
        env.add_template("index", "memory").unwrap();
        assert_eq!(env.get("index").unwrap().render(json!({})).unwrap(), "memory");
    }
}
