//! Constants used throughout docsmith

/// Extension recognised for templates and scripts
pub const TEMPLATE_EXTENSION: &str = "jinja";

/// Stem of the file that turns a folder into a template
pub const INDEX_TEMPLATE: &str = "index";

/// Conventional templates directory inside a model
pub const TEMPLATES_DIR: &str = "templates";

/// Conventional filters script inside a model
pub const FILTERS_SCRIPT: &str = "filters.jinja";

/// Conventional builders script inside a model
pub const BUILDERS_SCRIPT: &str = "builders.jinja";

/// Model manifest file names in order of preference
pub const MANIFEST_FILENAMES: &[&str] = &["model.yaml", "model.yml", "model.json"];

/// Output format used when neither options nor the model manifest set one
pub const DEFAULT_OUTPUT_FORMAT: &str = "rst";

/// Model used when none is requested
pub const DEFAULT_MODEL: &str = "rst";

/// Name of the directory holding the bundled models
pub const MODELS_DIR: &str = "models";

/// Bundled models in the source tree, used when none ship next to the executable
pub const SOURCE_MODELS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models");

/// Entry names skipped while scanning models and templates
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[".*", "__pycache__"];

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Names of the builders available without a builders script
pub mod builders {
    pub const CLASS: &str = "class";
    pub const INDEX: &str = "index";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
