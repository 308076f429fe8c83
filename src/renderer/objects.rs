//! Values handed to builder scripts.

use crate::ioutils::{output_file_path, write_file};
use log::debug;
use minijinja::value::{from_args, Object};
use minijinja::{Environment, Error, ErrorKind, State, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// A compiled template as seen from a builder script: `template.name` and
/// `template.render(context)`.
#[derive(Debug)]
pub struct TemplateObject {
    env: Environment<'static>,
    name: String,
}

impl TemplateObject {
    pub fn new(env: Environment<'static>, name: impl Into<String>) -> Self {
        Self { env, name: name.into() }
    }
}

impl Object for TemplateObject {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "name" => Some(Value::from(self.name.as_str())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "render" => {
                let (context,): (Value,) = from_args(args)?;
                let template = self.env.get_template(&self.name)?;
                template.render(context).map(Value::from)
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("template has no method named {method}"),
            )),
        }
    }
}

/// The output directory as seen from a builder script: `output.path`,
/// `output.format` and `output.write(stem, content)`.
#[derive(Debug)]
pub struct OutputObject {
    dir: PathBuf,
    format: String,
}

impl OutputObject {
    pub fn new(dir: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self { dir: dir.into(), format: format.into() }
    }
}

impl Object for OutputObject {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "path" => Some(Value::from(self.dir.display().to_string())),
            "format" => Some(Value::from(self.format.as_str())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "write" => {
                let (stem, content): (String, String) = from_args(args)?;
                let dest = output_file_path(&self.dir, &stem, &self.format);
                debug!("Writing {}", dest.display());
                write_file(&content, &dest).map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("cannot write {}", dest.display()),
                    )
                    .with_source(e)
                })?;
                Ok(Value::from(""))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("output has no method named {method}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn template_object_renders_and_exposes_name() {
        let mut env = Environment::new();
        env.add_template_owned("greeting", "Hello, {{ name }}!").unwrap();
        let template = Value::from_object(TemplateObject::new(env.clone(), "greeting"));

        let result = env
            .render_str(
                "{{ template.name }}: {{ template.render({'name': 'Node'}) }}",
                context! { template },
            )
            .unwrap();
        assert_eq!(result, "greeting: Hello, Node!");
    }

    #[test]
    fn output_object_writes_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Value::from_object(OutputObject::new(tmp.path(), "md"));

        let env = Environment::new();
        let rendered = env
            .render_str("{{ output.format }}{{ output.write('node', 'body') }}", context! { output })
            .unwrap();

        assert_eq!(rendered, "md");
        assert_eq!(std::fs::read_to_string(tmp.path().join("node.md")).unwrap(), "body");
    }

    #[test]
    fn unknown_methods_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Value::from_object(OutputObject::new(tmp.path(), "rst"));
        let env = Environment::new();
        assert!(env.render_str("{{ output.remove('x') }}", context! { output }).is_err());
    }
}
