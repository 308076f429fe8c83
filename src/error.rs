use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The requested model is neither an existing directory nor a built-in model name.
    #[error("Cannot proceed: model '{model}' not found. Available models: {available}.")]
    ModelNotFoundError { model: String, available: String },

    /// A filters or builders script could not be read, compiled or evaluated.
    #[error("Cannot load script '{path}'. Original error: {e}")]
    ScriptLoadError { path: String, e: String },

    /// A builder failed while producing output for a template.
    #[error("Builder for template '{template}' failed: {source}")]
    BuilderExecutionError {
        template: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid documentation context: {0}.")]
    ContextError(String),

    #[error("Template error: {0}.")]
    TemplateError(String),

    #[error("Unknown translator '{name}'. Available translators: {available}.")]
    UnknownTranslatorError { name: String, available: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with docsmith's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
