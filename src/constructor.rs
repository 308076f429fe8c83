//! The construction pipeline: model resolution, discovery, script loading and builder dispatch.

use crate::builder::{BuilderFn, BuilderRegistry};
use crate::constants::{DEFAULT_MODEL, DEFAULT_OUTPUT_FORMAT};
use crate::error::{Error, Result};
use crate::ioutils::create_dir_all;
use crate::model::{default_models_root, resolve_model, Model};
use crate::renderer::TemplateEnvironment;
use crate::scanner::{find_models, find_templates, TemplateEntry};
use crate::script::{load_callables, ScriptCategory, ScriptFunction};
use crate::translation::ContextTranslator;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// What to construct with. Unset paths fall back to the model's own layout.
#[derive(Debug, Clone)]
pub struct ConstructorOptions {
    /// Built-in model name, or a path to a model directory.
    pub model: String,
    /// Where built-in models are looked up.
    pub models_root: PathBuf,
    pub templates_path: Option<PathBuf>,
    pub filters_path: Option<PathBuf>,
    pub builders_path: Option<PathBuf>,
    /// Extension of every written document; defaults to the model's format, then `rst`.
    pub output_format: Option<String>,
}

impl Default for ConstructorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            models_root: default_models_root(),
            templates_path: None,
            filters_path: None,
            builders_path: None,
            output_format: None,
        }
    }
}

/// Everything a construction run needs, resolved up front.
///
/// Creating a constructor already fails on unknown models and broken
/// scripts, so no document is written when those are wrong.
pub struct Constructor {
    models: Vec<PathBuf>,
    model: Model,
    templates_path: PathBuf,
    templates: Vec<TemplateEntry>,
    filters: Vec<(String, ScriptFunction)>,
    builders: BuilderRegistry,
    env: TemplateEnvironment,
    output_format: String,
}

impl Constructor {
    /// Resolves the model, discovers its templates and loads its scripts.
    ///
    /// # Arguments
    /// * `options` - Model selection and path overrides
    ///
    /// # Returns
    /// * `Result<Self>` - `ModelNotFoundError` for unknown models and
    ///   `ScriptLoadError` for scripts that cannot be loaded
    ///
    /// # Examples
    /// ```
    /// use docsmith::{Constructor, ConstructorOptions};
    ///
    /// let constructor = Constructor::new(ConstructorOptions::default()).unwrap();
    /// assert_eq!(constructor.model().name, "rst");
    /// assert_eq!(constructor.builders().names(), ["class", "index"]);
    /// ```
    pub fn new(options: ConstructorOptions) -> Result<Self> {
        if !options.models_root.is_dir() {
            warn!("Models directory {} does not exist", options.models_root.display());
        }
        let models = find_models(&options.models_root)?;
        let model = resolve_model(&options.model, &models)?;

        let templates_path =
            options.templates_path.unwrap_or_else(|| model.templates_path.clone());
        let templates = find_templates(&templates_path)?;

        let filters_path = options.filters_path.or_else(|| model.filters_script.clone());
        let filters = load_callables(filters_path.as_deref(), ScriptCategory::Filters)?;

        let builders_path = options.builders_path.or_else(|| model.builders_script.clone());
        let mut builders = BuilderRegistry::new();
        builders.register_scripts(load_callables(builders_path.as_deref(), ScriptCategory::Builders)?);

        let mut env = TemplateEnvironment::new(&templates_path);
        env.register_filters(&filters);

        let output_format = options
            .output_format
            .or_else(|| model.format.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string());

        info!(
            "Model '{}': {} template(s), {} filter(s), builders {:?}, format '{output_format}'",
            model.name,
            templates.len(),
            filters.len(),
            builders.names()
        );

        Ok(Self { models, model, templates_path, templates, filters, builders, env, output_format })
    }

    /// Model directories found under the models root.
    pub fn models(&self) -> &[PathBuf] {
        &self.models
    }

    /// The model this constructor was resolved to.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Templates root in use: the override, or the model's templates directory.
    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Discovered templates, in the order builders run.
    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    /// Filters loaded from the filters script, in definition order.
    pub fn filters(&self) -> &[(String, ScriptFunction)] {
        &self.filters
    }

    /// Builders by template name, script builders merged over the defaults.
    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// Extension of every written document.
    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// The template environment with script filters registered.
    pub fn environment(&self) -> &TemplateEnvironment {
        &self.env
    }

    /// Registers a builder, replacing any builder with the same name.
    ///
    /// # Arguments
    /// * `name` - Logical name of the template the builder handles
    /// * `builder` - The builder function
    pub fn register_builder<N: Into<String>>(&mut self, name: N, builder: BuilderFn) {
        self.builders.register(name, builder);
    }

    /// Runs the matching builder for every discovered template, in discovery order.
    ///
    /// The output directory is created first, even when no document ends up
    /// in it. Templates without a builder are skipped. The first failing
    /// builder stops the run; documents written before it stay in place.
    ///
    /// # Arguments
    /// * `context` - Documentation context handed to every builder
    /// * `path` - Output directory
    ///
    /// # Returns
    /// * `Result<()>` - `BuilderExecutionError` naming the failing template
    pub fn build_templates(&self, context: &serde_json::Value, path: &Path) -> Result<()> {
        create_dir_all(path)?;
        for entry in &self.templates {
            let template = self.env.compile(entry)?;
            let Some(builder) = self.builders.resolve(&entry.name) else {
                debug!("No builder for template '{}', skipping", entry.name);
                continue;
            };

            debug!("Building template '{}' into {}", entry.name, path.display());
            builder(&self.output_format, &template, context, path).map_err(|e| {
                Error::BuilderExecutionError { template: entry.name.clone(), source: Box::new(e) }
            })?;
        }
        Ok(())
    }

    /// Writes the documents for `context` under `output_dir`.
    ///
    /// # Arguments
    /// * `context` - Documentation context, usually already translated
    /// * `output_dir` - Output directory, created when missing
    pub fn construct<P: AsRef<Path>>(
        &self,
        context: &serde_json::Value,
        output_dir: P,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        info!("Constructing documentation into {}", output_dir.display());
        self.build_templates(context, output_dir)
    }

    /// Translates the markup of `context` and then constructs it.
    ///
    /// # Returns
    /// * `Result<serde_json::Value>` - The translated context
    pub fn translate_and_construct<P: AsRef<Path>>(
        &self,
        mut context: serde_json::Value,
        translator: &ContextTranslator<'_>,
        output_dir: P,
    ) -> Result<serde_json::Value> {
        translator.translate(&mut context);
        self.construct(&context, output_dir)?;
        Ok(context)
    }
}
