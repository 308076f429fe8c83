//! Markup translation of documentation contexts.
//!
//! Every free-text field of a class record is interpreted as markup and
//! rewritten into the selected output syntax before any template sees it.

mod context;
mod markup;
mod syntax;

pub use context::{ContextTranslator, MemberKind};
pub use markup::{BbCodeInterpreter, Interpreter, Markup, Node, ReferenceKind, Style};
pub use syntax::{
    get_translator, MarkdownTranslator, PlainTranslator, RstTranslator, SyntaxTranslator,
    TRANSLATORS,
};
