//! Template environment, native filters and the values exposed to builder scripts.

mod environment;
pub mod filters;
pub mod objects;

pub use environment::{TemplateEnvironment, TemplateHandle};
