use super::markup::Interpreter;
use super::syntax::SyntaxTranslator;
use log::{debug, trace};
use serde_json::Value;

/// Class record keys that hold translatable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    BriefDescription,
    Description,
    Constants,
    Enums,
    Methods,
    Properties,
    Signals,
    ThemeItems,
}

impl MemberKind {
    /// Every kind, in traversal order.
    pub const ALL: [MemberKind; 8] = [
        MemberKind::BriefDescription,
        MemberKind::Description,
        MemberKind::Constants,
        MemberKind::Enums,
        MemberKind::Methods,
        MemberKind::Properties,
        MemberKind::Signals,
        MemberKind::ThemeItems,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MemberKind::BriefDescription => "brief_description",
            MemberKind::Description => "description",
            MemberKind::Constants => "constants",
            MemberKind::Enums => "enums",
            MemberKind::Methods => "methods",
            MemberKind::Properties => "properties",
            MemberKind::Signals => "signals",
            MemberKind::ThemeItems => "theme_items",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        MemberKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Rewrites the text fields of a documentation context into the target syntax.
pub struct ContextTranslator<'a> {
    interpreter: &'a dyn Interpreter,
    translator: &'a dyn SyntaxTranslator,
}

impl<'a> ContextTranslator<'a> {
    pub fn new(interpreter: &'a dyn Interpreter, translator: &'a dyn SyntaxTranslator) -> Self {
        Self { interpreter, translator }
    }

    pub fn translate_text(&self, text: &str) -> String {
        self.translator.translate(&self.interpreter.interpret(text))
    }

    /// Translates every class in `context["classes"]` in place.
    ///
    /// Keys outside the recognised member kinds, and records whose
    /// `description` is missing or not a string, are left as they are.
    pub fn translate<'c>(&self, context: &'c mut Value) -> &'c mut Value {
        match context.get_mut("classes").and_then(Value::as_array_mut) {
            Some(classes) => {
                debug!("Translating {} class record(s)", classes.len());
                for class in classes.iter_mut() {
                    self.translate_class(class);
                }
            }
            None => debug!("Context has no 'classes' sequence, nothing to translate"),
        }
        context
    }

    fn translate_class(&self, class: &mut Value) {
        let Some(record) = class.as_object_mut() else {
            return;
        };
        for kind in MemberKind::ALL {
            if let Some(member) = record.get_mut(kind.key()) {
                trace!("Translating '{}'", kind.key());
                self.visit(kind, member);
            }
        }
    }

    fn visit(&self, kind: MemberKind, member: &mut Value) {
        match kind {
            MemberKind::BriefDescription | MemberKind::Description => self.translate_field(member),
            MemberKind::Constants
            | MemberKind::Methods
            | MemberKind::Properties
            | MemberKind::Signals
            | MemberKind::ThemeItems => self.translate_records(member),
            MemberKind::Enums => {
                for record in member.as_array_mut().into_iter().flatten() {
                    self.translate_description(record);
                    if let Some(values) = record.get_mut("values") {
                        self.translate_records(values);
                    }
                }
            }
        }
    }

    fn translate_records(&self, records: &mut Value) {
        for record in records.as_array_mut().into_iter().flatten() {
            self.translate_description(record);
        }
    }

    fn translate_description(&self, record: &mut Value) {
        if let Some(description) = record.get_mut("description") {
            self.translate_field(description);
        }
    }

    fn translate_field(&self, field: &mut Value) {
        if let Value::String(text) = field {
            *text = self.translate_text(text);
        }
    }
}
