//! A line-based toy engine for tests.
//!
//! Grammar, one statement per line:
//! - `def NAME ...` -> `function_definition` (`name` field on the identifier)
//! - `NAME = VALUE` -> `assignment` (`left` and `right` fields)
//! - anything else  -> `expression_statement`
//!
//! Tokens are `identifier`, `integer` (named), `def` and single punctuation
//! characters (anonymous). The root is `module`, spanning the whole text.

use std::ops::Range;
use std::sync::Arc;

use grove_core::{TypeTable, parse_node_types};
use grove_codegen::{GenerateConfig, TypeGenerator};

use crate::engine::{InputEdit, ParseEngine, RawNode, SyntaxTree};
use crate::error::ParseError;
use crate::materialize::Materializer;
use crate::node::Node;
use crate::registry::TypeRegistry;
use crate::text::{Point, point_at};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyNode {
    pub kind: String,
    pub named: bool,
    pub range: Range<usize>,
    pub start: Point,
    pub end: Point,
    pub children: Vec<(ToyNode, Option<String>)>,
}

impl ToyNode {
    pub fn new(kind: &str, named: bool, range: Range<usize>) -> Self {
        Self {
            kind: kind.to_string(),
            named,
            range,
            start: Point::default(),
            end: Point::default(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, node: ToyNode, field: Option<&str>) -> Self {
        self.children.push((node, field.map(str::to_string)));
        self
    }
}

impl RawNode for ToyNode {
    fn type_name(&self) -> &str {
        &self.kind
    }

    fn named(&self) -> bool {
        self.named
    }

    fn span(&self) -> Range<usize> {
        self.range.clone()
    }

    fn start_point(&self) -> Point {
        self.start
    }

    fn end_point(&self) -> Point {
        self.end
    }

    fn children_with_fields(&self) -> Vec<(Self, Option<&str>)> {
        self.children
            .iter()
            .map(|(node, field)| (node.clone(), field.as_deref()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ToyTree {
    pub root: ToyNode,
    /// Edits applied since this tree was parsed.
    pub edits: Vec<InputEdit>,
}

impl SyntaxTree for ToyTree {
    type Node<'t>
        = ToyNode
    where
        Self: 't;

    fn root(&self) -> ToyNode {
        self.root.clone()
    }

    fn apply_edit(&mut self, edit: &InputEdit) {
        self.edits.push(*edit);
    }
}

#[derive(Debug, Default)]
pub struct ToyEngine {
    /// Fail every parse while set.
    pub fail: bool,
    pub parses: usize,
    /// Edits carried by the old tree of the most recent parse.
    pub last_hint: Option<Vec<InputEdit>>,
}

impl ParseEngine for ToyEngine {
    type Tree = ToyTree;

    fn parse(&mut self, text: &[u8], old_tree: Option<&ToyTree>) -> Result<ToyTree, ParseError> {
        if self.fail {
            return Err(ParseError::NoTree);
        }
        self.parses += 1;
        self.last_hint = old_tree.map(|t| t.edits.clone());
        Ok(ToyTree {
            root: parse_module(text),
            edits: Vec::new(),
        })
    }
}

fn token(text: &[u8], kind: &str, named: bool, range: Range<usize>) -> ToyNode {
    ToyNode {
        kind: kind.to_string(),
        named,
        start: point_at(text, range.start),
        end: point_at(text, range.end),
        range,
        children: Vec::new(),
    }
}

fn tokenize(text: &[u8], line: Range<usize>) -> Vec<ToyNode> {
    let mut tokens = Vec::new();
    let mut i = line.start;
    while i < line.end {
        let b = text[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < line.end && (text[i].is_ascii_alphanumeric() || text[i] == b'_') {
                i += 1;
            }
            if &text[start..i] == b"def" {
                tokens.push(token(text, "def", false, start..i));
            } else {
                tokens.push(token(text, "identifier", true, start..i));
            }
        } else if b.is_ascii_digit() {
            let start = i;
            while i < line.end && text[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(token(text, "integer", true, start..i));
        } else {
            // One token per UTF-8 sequence.
            let start = i;
            i += 1;
            while i < line.end && (text[i] & 0xC0) == 0x80 {
                i += 1;
            }
            let kind = String::from_utf8_lossy(&text[start..i]).into_owned();
            tokens.push(token(text, &kind, false, start..i));
        }
    }
    tokens
}

fn parse_statement(text: &[u8], tokens: Vec<ToyNode>) -> ToyNode {
    let range = tokens[0].range.start..tokens[tokens.len() - 1].range.end;
    let is_def = tokens[0].kind == "def";
    let is_assignment =
        tokens.len() == 3 && tokens[0].kind == "identifier" && tokens[1].kind == "=";

    let kind = if is_def {
        "function_definition"
    } else if is_assignment {
        "assignment"
    } else {
        "expression_statement"
    };
    let mut node = token(text, kind, true, range);
    for (i, tok) in tokens.into_iter().enumerate() {
        let field = match (kind, i) {
            ("function_definition", 1) if tok.kind == "identifier" => Some("name"),
            ("assignment", 0) => Some("left"),
            ("assignment", 2) => Some("right"),
            _ => None,
        };
        node = node.child(tok, field);
    }
    node
}

pub fn parse_module(text: &[u8]) -> ToyNode {
    let mut root = token(text, "module", true, 0..text.len());
    let mut start = 0;
    while start < text.len() {
        let end = text[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(text.len(), |p| start + p);
        let tokens = tokenize(text, start..end);
        if !tokens.is_empty() {
            root = root.child(parse_statement(text, tokens), None);
        }
        start = end + 1;
    }
    root
}

pub const TOY_NODE_TYPES: &str = r#"[
  {"type": "module", "named": true},
  {"type": "_statement", "named": true, "subtypes": [
    {"type": "function_definition", "named": true},
    {"type": "assignment", "named": true},
    {"type": "expression_statement", "named": true}
  ]},
  {"type": "function_definition", "named": true, "fields": {
    "name": {"multiple": false, "required": true, "types": [{"type": "identifier", "named": true}]}
  }},
  {"type": "assignment", "named": true, "fields": {
    "left": {"multiple": false, "required": true, "types": [{"type": "identifier", "named": true}]},
    "right": {"multiple": false, "required": true, "types": [
      {"type": "identifier", "named": true},
      {"type": "integer", "named": true}
    ]}
  }},
  {"type": "expression_statement", "named": true},
  {"type": "identifier", "named": true},
  {"type": "integer", "named": true},
  {"type": "def", "named": false},
  {"type": "=", "named": false}
]"#;

pub fn toy_table() -> TypeTable {
    let nodes = parse_node_types(TOY_NODE_TYPES).expect("toy node types are valid");
    TypeGenerator::new(&nodes, &GenerateConfig::default())
        .build_table()
        .expect("toy table builds")
}

pub fn toy_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(&toy_table());
    registry
}

/// Parse `text` with the toy grammar and materialize it against the toy registry.
pub fn materialize(text: &str) -> Node {
    let source: Arc<[u8]> = Arc::from(text.as_bytes());
    Materializer::new(&toy_registry())
        .build(&parse_module(text.as_bytes()), &source)
        .expect("toy trees are well formed")
}
