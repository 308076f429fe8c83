use crate::constants::{exit_codes, verbosity, DEFAULT_MODEL};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for docsmith.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON documentation context, or `-` to read it from stdin.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Destination directory for generated documents.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Built-in model name or path to a model directory.
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Directory with templates, instead of the model's own.
    #[arg(short = 'T', long)]
    pub templates: Option<PathBuf>,

    /// Script with filter macros, instead of the model's own.
    #[arg(short = 'F', long)]
    pub filters: Option<PathBuf>,

    /// Script with builder macros, instead of the model's own.
    #[arg(short = 'B', long)]
    pub builders: Option<PathBuf>,

    /// Extension of the generated documents.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Syntax the documentation markup is translated into.
    #[arg(short, long, default_value = "rst")]
    pub translator: String,

    /// Directory with the models available by name.
    #[arg(long = "models-dir", value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
