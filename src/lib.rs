//! Template-driven construction of API documentation.
//!
//! A documentation context (a `classes` sequence of class records) has its
//! markup translated by [`translation`], then a [`Constructor`] renders it
//! with the templates, filters and builders of a model.
//!
//! # Examples
//! ```no_run
//! use docsmith::translation::{get_translator, BbCodeInterpreter, ContextTranslator};
//! use docsmith::{Constructor, ConstructorOptions};
//!
//! # fn main() -> docsmith::Result<()> {
//! let context = docsmith::ioutils::read_context("classes.json")?;
//! let syntax = get_translator("rst")?;
//! let translator = ContextTranslator::new(&BbCodeInterpreter, syntax.as_ref());
//! let constructor = Constructor::new(ConstructorOptions::default())?;
//! constructor.translate_and_construct(context, &translator, "docs")?;
//! # Ok(())
//! # }
//! ```

/// Handles argument parsing and the command line runner.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Reserved entry names skipped during discovery.
pub mod ignore;

/// Discovery of models and templates.
pub mod scanner;

/// Loading of filters and builders scripts.
pub mod script;

/// Template environment and rendering.
pub mod renderer;

/// Builders and the builder registry.
pub mod builder;

/// Markup translation of documentation contexts.
pub mod translation;

/// Model resolution.
pub mod model;

/// Orchestration of a construction run.
pub mod constructor;

pub use constructor::{Constructor, ConstructorOptions};
pub use error::{Error, Result};
