//! Output syntaxes interpreted markup can be translated into.

use super::markup::{Markup, Node, ReferenceKind, Style};
use crate::error::{Error, Result};

/// Names accepted by [`get_translator`].
pub const TRANSLATORS: &[&str] = &["rst", "markdown", "plain"];

/// Renders markup into a target syntax.
pub trait SyntaxTranslator {
    fn translate_node(&self, node: &Node) -> String;

    fn translate_nodes(&self, nodes: &[Node]) -> String {
        nodes.iter().map(|node| self.translate_node(node)).collect()
    }

    fn translate(&self, markup: &Markup) -> String {
        self.translate_nodes(markup.nodes())
    }
}

/// Returns the translator registered under `name`.
pub fn get_translator(name: &str) -> Result<Box<dyn SyntaxTranslator>> {
    match name {
        "rst" => Ok(Box::new(RstTranslator)),
        "markdown" | "md" => Ok(Box::new(MarkdownTranslator)),
        "plain" => Ok(Box::new(PlainTranslator)),
        _ => Err(Error::UnknownTranslatorError {
            name: name.to_string(),
            available: TRANSLATORS.join(", "),
        }),
    }
}

fn code_block_body(code: &str) -> &str {
    code.trim_matches('\n')
}

/// reStructuredText output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RstTranslator;

impl SyntaxTranslator for RstTranslator {
    fn translate_node(&self, node: &Node) -> String {
        match node {
            Node::Text(text) => text.clone(),
            Node::Styled { style, children } => {
                let inner = self.translate_nodes(children);
                match style {
                    Style::Bold => format!("**{inner}**"),
                    Style::Italic => format!("*{inner}*"),
                    Style::Keyboard => format!(":kbd:`{inner}`"),
                    Style::Underline | Style::Strikethrough => inner,
                }
            }
            Node::Group(children) => self.translate_nodes(children),
            Node::Code(code) => format!("``{code}``"),
            Node::CodeBlock(code) => {
                let indented: Vec<String> =
                    code_block_body(code).lines().map(|line| format!("    {line}")).collect();
                format!("\n\n::\n\n{}\n\n", indented.join("\n"))
            }
            Node::Link { url, children } => {
                format!("`{} <{url}>`__", self.translate_nodes(children))
            }
            Node::Reference { kind: ReferenceKind::Class, target } => {
                format!(":ref:`{target}<class_{}>`", target.to_lowercase())
            }
            Node::Reference { kind: ReferenceKind::Param, target } => format!("*{target}*"),
            Node::Reference { target, .. } => format!("``{target}``"),
            Node::LineBreak => "\n\n".to_string(),
        }
    }
}

/// Markdown output. Class references link to the per-class documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTranslator;

impl SyntaxTranslator for MarkdownTranslator {
    fn translate_node(&self, node: &Node) -> String {
        match node {
            Node::Text(text) => text.clone(),
            Node::Styled { style, children } => {
                let inner = self.translate_nodes(children);
                match style {
                    Style::Bold => format!("**{inner}**"),
                    Style::Italic => format!("*{inner}*"),
                    Style::Strikethrough => format!("~~{inner}~~"),
                    Style::Keyboard => format!("<kbd>{inner}</kbd>"),
                    Style::Underline => inner,
                }
            }
            Node::Group(children) => self.translate_nodes(children),
            Node::Code(code) => format!("`{code}`"),
            Node::CodeBlock(code) => format!("\n\n```\n{}\n```\n\n", code_block_body(code)),
            Node::Link { url, children } => {
                format!("[{}]({url})", self.translate_nodes(children))
            }
            Node::Reference { kind: ReferenceKind::Class, target } => {
                format!("[{target}]({}.md)", target.to_lowercase())
            }
            Node::Reference { kind: ReferenceKind::Param, target } => format!("*{target}*"),
            Node::Reference { target, .. } => format!("`{target}`"),
            Node::LineBreak => "  \n".to_string(),
        }
    }
}

/// Markup stripped down to its text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTranslator;

impl SyntaxTranslator for PlainTranslator {
    fn translate_node(&self, node: &Node) -> String {
        match node {
            Node::Text(text) | Node::Code(text) => text.clone(),
            Node::CodeBlock(code) => code_block_body(code).to_string(),
            Node::Styled { children, .. }
            | Node::Group(children)
            | Node::Link { children, .. } => self.translate_nodes(children),
            Node::Reference { target, .. } => target.clone(),
            Node::LineBreak => "\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::{BbCodeInterpreter, Interpreter};

    fn render(translator: &str, text: &str) -> String {
        let translator = get_translator(translator).unwrap();
        BbCodeInterpreter.interpret(text).translate(translator.as_ref())
    }

    #[test]
    fn rst_output() {
        assert_eq!(render("rst", "[b]Bold[/b] and [i]it[/i]"), "**Bold** and *it*");
        assert_eq!(render("rst", "Use [code]queue_free()[/code]."), "Use ``queue_free()``.");
        assert_eq!(render("rst", "A [Node2D]."), "A :ref:`Node2D<class_node2d>`.");
        assert_eq!(render("rst", "[param delta] [member position]"), "*delta* ``position``");
        assert_eq!(
            render("rst", "[url=https://docs.godotengine.org]docs[/url]"),
            "`docs <https://docs.godotengine.org>`__"
        );
        assert_eq!(
            render("rst", "Example:[codeblock]\nvar a = 1\nprint(a)\n[/codeblock]"),
            "Example:\n\n::\n\n    var a = 1\n    print(a)\n\n"
        );
    }

    #[test]
    fn markdown_output() {
        assert_eq!(render("markdown", "[b]Bold[/b] [s]old[/s]"), "**Bold** ~~old~~");
        assert_eq!(render("md", "A [Node2D]."), "A [Node2D](node2d.md).");
        assert_eq!(render("markdown", "[url=https://a.b]a[/url]"), "[a](https://a.b)");
        assert_eq!(render("markdown", "[codeblock]\nx\n[/codeblock]"), "\n\n```\nx\n```\n\n");
    }

    #[test]
    fn plain_output() {
        assert_eq!(
            render("plain", "[b]Bold[/b] [code]x[/code] [Node] [color=red]red[/color]"),
            "Bold x Node red"
        );
    }

    #[test]
    fn unknown_translator() {
        let err = get_translator("html").err().unwrap();
        assert!(matches!(err, Error::UnknownTranslatorError { .. }));
    }
}
