//! Hierarchical markup encoding.
//!
//! Values are assembled into a small [`Node`] tree and written by a
//! [`MarkupWriter`], which indents as it goes: two spaces per open element,
//! one element per line, and leaf elements kept on a single line.

/// Line terminator of the markup file.
pub const LINE_END: &str = "\r\n";

const INDENT: &str = "  ";

/// Typed parameter categories understood by the renderer's scene loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    Bool1,
    Bool2,
    Bool3,
    Bool4,
    Int1,
    Int2,
    Int3,
    Int4,
    Float,
    Float1,
    Float2,
    Float3,
    Float4,
    Texture,
}

impl WireKind {
    pub fn tag(self) -> &'static str {
        match self {
            WireKind::Bool1 => "bool1",
            WireKind::Bool2 => "bool2",
            WireKind::Bool3 => "bool3",
            WireKind::Bool4 => "bool4",
            WireKind::Int1 => "int1",
            WireKind::Int2 => "int2",
            WireKind::Int3 => "int3",
            WireKind::Int4 => "int4",
            WireKind::Float => "float",
            WireKind::Float1 => "float1",
            WireKind::Float2 => "float2",
            WireKind::Float3 => "float3",
            WireKind::Float4 => "float4",
            WireKind::Texture => "texture",
        }
    }
}

/// Inline element content.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Bool(bool),
    /// Written quoted, with markup characters escaped.
    Text(String),
    Numbers(Vec<f64>),
    Integers(Vec<i64>),
    Bools(Vec<bool>),
}

impl Value {
    /// Render the value as element text. Lists are space-joined.
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Integer(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Text(s) => format!("\"{}\"", escape(s)),
            Value::Numbers(ns) => join(ns.iter().map(|n| format_number(*n))),
            Value::Integers(is) => join(is.iter().map(i64::to_string)),
            Value::Bools(bs) => join(bs.iter().map(bool::to_string)),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(ns: [f64; N]) -> Self {
        Value::Numbers(ns.to_vec())
    }
}

/// A nested key/value tree to be written as markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Value(Value),
    /// Self-describing typed parameter. Its key is the wire kind tag.
    Param { name: String, value: Value },
    Record(Record),
    /// Sibling records whose entries are written flat at one level.
    Records(Vec<Record>),
}

/// Ordered keyed entries, each written as a nested element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, Node)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, node: Node) -> Self {
        self.push(key, node);
        self
    }

    pub fn with_value(self, key: &str, value: impl Into<Value>) -> Self {
        self.with(key, Node::Value(value.into()))
    }

    pub fn with_param(self, kind: WireKind, name: &str, value: Value) -> Self {
        self.with(
            kind.tag(),
            Node::Param {
                name: name.to_string(),
                value,
            },
        )
    }

    pub fn push(&mut self, key: &str, node: Node) {
        self.entries.push((key.to_string(), node));
    }

    pub fn entries(&self) -> &[(String, Node)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writes markup line by line while tracking the nesting depth.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    out: String,
    depth: usize,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declaration(&mut self) {
        self.line("<?xml version=\"1.0\"?>");
    }

    pub fn open(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    /// Write a single-line element. Empty text still splits open and close tags.
    pub fn leaf(&mut self, tag: &str, name: Option<&str>, text: &str) {
        let open = match name {
            Some(name) => format!("<{} name=\"{}\">", tag, escape(name)),
            None => format!("<{}>", tag),
        };
        if text.is_empty() {
            self.line(&open);
            self.line(&format!("</{}>", tag));
        } else {
            self.line(&format!("{}{}</{}>", open, text, tag));
        }
    }

    /// Recursively encode `node` as an element named `tag`.
    pub fn element(&mut self, tag: &str, node: &Node) {
        match node {
            Node::Value(value) => self.leaf(tag, None, &value.render()),
            Node::Param { name, value } => self.leaf(tag, Some(name), &value.render()),
            Node::Record(record) => {
                self.open(tag);
                self.entries(record);
                self.close(tag);
            }
            Node::Records(records) => {
                self.open(tag);
                for record in records {
                    self.entries(record);
                }
                self.close(tag);
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn entries(&mut self, record: &Record) {
        for (key, child) in record.entries() {
            self.element(key, child);
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push_str(LINE_END);
    }
}

/// Format a number the way the renderer expects: no trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // normalizes -0
        return "0".to_string();
    }
    n.to_string()
}

/// Replace the characters that would end text or an attribute value early.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}
