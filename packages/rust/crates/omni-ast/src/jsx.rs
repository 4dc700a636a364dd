//! JSX markup views over a parsed UI source.
//!
//! Views never own text: every literal carries the byte range it was read
//! from so callers can splice replacements into the original source.

use std::ops::Range;

use thiserror::Error;

use crate::lang::Lang;
use crate::re_exports::{AstGrep, LanguageExt, SgNode, StrDoc, SupportLang};

const ELEMENT_KINDS: [&str; 2] = ["jsx_opening_element", "jsx_self_closing_element"];

/// Source could not be parsed cleanly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("syntax error at line {line}, column {column}")]
pub struct SyntaxError {
    /// Line of the first error node (1-indexed).
    pub line: usize,
    /// Column of the first error node (1-indexed, bytes).
    pub column: usize,
}

/// One parse of one file's text.
pub struct ParsedSource {
    grep: AstGrep<StrDoc<SupportLang>>,
    source: String,
}

impl ParsedSource {
    /// Parse `content` with the grammar for `lang`.
    ///
    /// # Errors
    /// Returns the position of the first `ERROR` node, or of the first token
    /// the grammar had to insert (`MISSING`), when the source does not parse
    /// cleanly.
    pub fn parse(content: &str, lang: Lang) -> Result<Self, SyntaxError> {
        let grep = lang.support_lang().ast_grep(content);
        let first_error = grep
            .root()
            .dfs()
            .find(|node| node.is_error() || node.is_missing())
            .map(|node| node.range().start);
        if let Some(offset) = first_error {
            let (line, column) = line_column(content, offset);
            return Err(SyntaxError { line, column });
        }
        Ok(Self {
            grep,
            source: content.to_string(),
        })
    }

    /// Original text this tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every element node (opening or self-closing tag), in document order.
    #[must_use]
    pub fn elements(&self) -> Vec<JsxElement<'_>> {
        let root = self.grep.root();
        root.dfs().filter_map(JsxElement::from_node).collect()
    }

    /// Every attribute node of every element, in document order.
    #[must_use]
    pub fn attributes(&self) -> Vec<JsxAttribute<'_>> {
        self.elements()
            .iter()
            .flat_map(JsxElement::attributes)
            .collect()
    }
}

/// An opening or self-closing JSX tag.
#[derive(Clone)]
pub struct JsxElement<'r> {
    node: SgNode<'r>,
}

impl<'r> JsxElement<'r> {
    fn from_node(node: SgNode<'r>) -> Option<Self> {
        let is_element = ELEMENT_KINDS.contains(&&*node.kind());
        is_element.then_some(Self { node })
    }

    /// Tag identifier as written (`div`, `Card`, `Foo.Bar`); `None` for fragments.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        self.node.field("name").map(|name| name.text().to_string())
    }

    /// Attributes in source order. Spread attributes are not included.
    #[must_use]
    pub fn attributes(&self) -> Vec<JsxAttribute<'r>> {
        self.node
            .children()
            .filter(|child| child.kind() == "jsx_attribute")
            .filter_map(JsxAttribute::from_node)
            .collect()
    }

    /// First attribute literally named `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<JsxAttribute<'r>> {
        self.attributes().into_iter().find(|attr| attr.name() == name)
    }
}

/// A `name` or `name=value` pair on an element.
#[derive(Clone)]
pub struct JsxAttribute<'r> {
    name: String,
    value: Option<SgNode<'r>>,
}

impl<'r> JsxAttribute<'r> {
    fn from_node(node: SgNode<'r>) -> Option<Self> {
        let mut parts = node
            .children()
            .filter(|child| child.is_named() && child.kind() != "comment");
        let name = parts.next()?.text().to_string();
        let value = parts.next();
        Some(Self { name, value })
    }

    /// Attribute name as written (`className`, `data-testid`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The literal string value: `a="x"` or `a={"x"}`.
    ///
    /// Anything computed (identifiers, calls, templates) yields `None`.
    #[must_use]
    pub fn string_literal(&self) -> Option<StringLiteral> {
        let value = self.value.as_ref()?;
        match &*value.kind() {
            "string" => StringLiteral::from_node(value, Quoting::JsxAttribute),
            "jsx_expression" => {
                let inner = expression_body(value)?;
                (inner.kind() == "string")
                    .then(|| StringLiteral::from_node(&inner, Quoting::Script))
                    .flatten()
            }
            _ => None,
        }
    }

    /// Entries of an object-literal value: `style={{ color: "red" }}`.
    #[must_use]
    pub fn object_entries(&self) -> Option<Vec<ObjectEntry>> {
        let value = self.value.as_ref()?;
        if value.kind() != "jsx_expression" {
            return None;
        }
        let object = expression_body(value)?;
        if object.kind() != "object" {
            return None;
        }
        Some(
            object
                .children()
                .filter(|child| child.kind() == "pair")
                .filter_map(|pair| ObjectEntry::from_pair(&pair))
                .collect(),
        )
    }
}

/// The single named child of a `{ ... }` expression container.
fn expression_body<'r>(container: &SgNode<'r>) -> Option<SgNode<'r>> {
    let mut named = container
        .children()
        .filter(|child| child.is_named() && child.kind() != "comment");
    let body = named.next()?;
    named.next().is_none().then_some(body)
}

/// How a string literal's contents must be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// JSX attribute string: no backslash escapes, entities only.
    JsxAttribute,
    /// JavaScript string literal inside an expression.
    Script,
}

/// A quoted string with the byte range of its contents (quotes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Raw contents between the quotes.
    pub value: String,
    /// Byte range of the contents.
    pub content: Range<usize>,
    /// Delimiting quote character.
    pub quote: char,
    /// Encoding rules for the contents.
    pub quoting: Quoting,
}

impl StringLiteral {
    fn from_node(node: &SgNode<'_>, quoting: Quoting) -> Option<Self> {
        let text = node.text();
        let quote = text.chars().next()?;
        if !matches!(quote, '"' | '\'') || text.len() < 2 || !text.ends_with(quote) {
            return None;
        }
        let range = node.range();
        Some(Self {
            value: text[1..text.len() - 1].to_string(),
            content: range.start + 1..range.end - 1,
            quote,
            quoting,
        })
    }

    /// Encode `raw` so it can sit between this literal's quotes.
    #[must_use]
    pub fn encode(&self, raw: &str) -> String {
        match self.quoting {
            Quoting::JsxAttribute => {
                let entity = if self.quote == '"' { "&quot;" } else { "&#39;" };
                raw.replace(self.quote, entity)
            }
            Quoting::Script => escape_script(raw, self.quote),
        }
    }
}

fn escape_script(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// A literal value inside an object entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `"red"` or `'red'`.
    Str(StringLiteral),
    /// `12`, `1.5`; `range` covers the raw token.
    Number {
        /// Raw token text.
        raw: String,
        /// Byte range of the token.
        range: Range<usize>,
    },
}

impl Literal {
    fn from_node(node: &SgNode<'_>) -> Option<Self> {
        match &*node.kind() {
            "string" => StringLiteral::from_node(node, Quoting::Script).map(Self::Str),
            "number" => Some(Self::Number {
                raw: node.text().to_string(),
                range: node.range(),
            }),
            _ => None,
        }
    }

    /// The value as compared against instructions: string contents or raw number text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Str(s) => &s.value,
            Self::Number { raw, .. } => raw,
        }
    }
}

/// One `key: value` pair of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Key name: identifier text, or the contents of a quoted key.
    pub key: String,
    /// Literal value; `None` when the value is computed.
    pub value: Option<Literal>,
}

impl ObjectEntry {
    fn from_pair(pair: &SgNode<'_>) -> Option<Self> {
        let key_node = pair.field("key")?;
        let key = match &*key_node.kind() {
            "property_identifier" => key_node.text().to_string(),
            "string" => StringLiteral::from_node(&key_node, Quoting::Script)?.value,
            _ => return None,
        };
        let value = pair.field("value").and_then(|v| Literal::from_node(&v));
        Some(Self { key, value })
    }
}

/// Convert a byte offset to a 1-indexed `(line, column)` pair.
#[must_use]
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}
