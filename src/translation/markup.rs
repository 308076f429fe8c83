//! Inline documentation markup and its BBCode interpreter.

/// Inline emphasis styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Keyboard,
}

/// What a reference tag points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Class,
    Member,
    Method,
    Signal,
    Constant,
    Enum,
    Param,
    Annotation,
    ThemeItem,
}

impl ReferenceKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "member" => Some(ReferenceKind::Member),
            "method" => Some(ReferenceKind::Method),
            "signal" => Some(ReferenceKind::Signal),
            "constant" => Some(ReferenceKind::Constant),
            "enum" => Some(ReferenceKind::Enum),
            "param" => Some(ReferenceKind::Param),
            "annotation" => Some(ReferenceKind::Annotation),
            "theme_item" => Some(ReferenceKind::ThemeItem),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Styled { style: Style, children: Vec<Node> },
    /// Presentation-only wrappers (`[center]`, `[color=...]`, `[font=...]`).
    Group(Vec<Node>),
    Code(String),
    CodeBlock(String),
    Link { url: String, children: Vec<Node> },
    Reference { kind: ReferenceKind, target: String },
    LineBreak,
}

/// Interpreted markup, ready to be translated into an output syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Renders this markup with `translator`.
    pub fn translate(&self, translator: &dyn super::SyntaxTranslator) -> String {
        translator.translate(self)
    }
}

/// Turns raw documentation text into markup.
pub trait Interpreter {
    fn interpret(&self, text: &str) -> Markup;
}

/// Interpreter for the BBCode flavour used in class reference XML.
///
/// Unknown or unbalanced tags are kept as literal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BbCodeInterpreter;

impl Interpreter for BbCodeInterpreter {
    fn interpret(&self, text: &str) -> Markup {
        let mut parser = Parser { src: text, pos: 0, depth: 0 };
        Markup::new(parser.parse_until(None))
    }
}

/// Deepest tag nesting interpreted; tags opened below it stay literal.
const MAX_NESTING_DEPTH: usize = 32;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

fn flush(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
    }
}

fn is_class_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Concatenated text of a node list, used for links without an explicit target.
fn plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) | Node::Code(text) | Node::CodeBlock(text) => text.clone(),
            Node::Styled { children, .. } | Node::Group(children) | Node::Link { children, .. } => {
                plain_text(children)
            }
            Node::Reference { target, .. } => target.clone(),
            Node::LineBreak => "\n".to_string(),
        })
        .collect()
}

impl<'a> Parser<'a> {
    fn parse_until(&mut self, closing: Option<&str>) -> Vec<Node> {
        let src = self.src;
        let mut nodes = Vec::new();
        let mut text = String::new();

        while self.pos < src.len() {
            let rest = &src[self.pos..];
            let Some(start) = rest.find('[') else {
                text.push_str(rest);
                self.pos = src.len();
                break;
            };
            text.push_str(&rest[..start]);
            self.pos += start;

            let rest = &src[self.pos..];
            let Some(end) = rest.find(']') else {
                text.push_str(rest);
                self.pos = src.len();
                break;
            };
            let raw = &rest[..=end];
            let tag = &rest[1..end];
            self.pos += end + 1;

            if let Some(name) = tag.strip_prefix('/') {
                if Some(name) == closing {
                    flush(&mut text, &mut nodes);
                    return nodes;
                }
                text.push_str(raw);
                continue;
            }

            match self.parse_tag(tag) {
                Some(Node::Text(literal)) => text.push_str(&literal),
                Some(node) => {
                    flush(&mut text, &mut nodes);
                    nodes.push(node);
                }
                None => text.push_str(raw),
            }
        }

        flush(&mut text, &mut nodes);
        nodes
    }

    /// Everything up to `[/name]`, uninterpreted.
    fn raw_until(&mut self, name: &str) -> String {
        let src = self.src;
        let rest = &src[self.pos..];
        let closing = format!("[/{name}]");
        match rest.find(&closing) {
            Some(end) => {
                self.pos += end + closing.len();
                rest[..end].to_string()
            }
            None => {
                self.pos = src.len();
                rest.to_string()
            }
        }
    }

    /// Children of a container tag, up to its `[/name]`.
    fn nested(&mut self, name: &str) -> Vec<Node> {
        self.depth += 1;
        let children = self.parse_until(Some(name));
        self.depth -= 1;
        children
    }

    fn styled(&mut self, style: Style, name: &str) -> Node {
        Node::Styled { style, children: self.nested(name) }
    }

    fn parse_tag(&mut self, tag: &str) -> Option<Node> {
        let (name, option) = match tag.split_once('=') {
            Some((name, option)) => (name, Some(option)),
            None => (tag, None),
        };

        let is_container =
            matches!(name, "b" | "i" | "u" | "s" | "kbd" | "center" | "color" | "font" | "url");
        if is_container && self.depth >= MAX_NESTING_DEPTH {
            return None;
        }

        let node = match name {
            "b" => self.styled(Style::Bold, name),
            "i" => self.styled(Style::Italic, name),
            "u" => self.styled(Style::Underline, name),
            "s" => self.styled(Style::Strikethrough, name),
            "kbd" => self.styled(Style::Keyboard, name),
            "center" | "color" | "font" => Node::Group(self.nested(name)),
            "code" => Node::Code(self.raw_until(name)),
            "codeblock" => Node::CodeBlock(self.raw_until(name)),
            "url" => {
                let children = self.nested(name);
                let url = option.map(str::to_string).unwrap_or_else(|| plain_text(&children));
                Node::Link { url, children }
            }
            "br" => Node::LineBreak,
            "lb" => Node::Text("[".to_string()),
            "rb" => Node::Text("]".to_string()),
            _ => {
                if let Some((kind, target)) = tag.split_once(' ') {
                    let kind = ReferenceKind::from_tag(kind)?;
                    Node::Reference { kind, target: target.trim().to_string() }
                } else if is_class_name(tag) {
                    Node::Reference { kind: ReferenceKind::Class, target: tag.to_string() }
                } else {
                    return None;
                }
            }
        };
        Some(node)
    }
}
