//! Grammar type names to Rust type identifiers.

use std::collections::HashSet;

use grove_core::RawNode;
use grove_core::utils::to_pascal_case;

use crate::config::NAMED_SUFFIX;

/// Prelude items the generated module refers to unqualified.
const PRELUDE_NAMES: &[&str] = &[
    "Self", "Option", "Some", "None", "Result", "Ok", "Err", "Vec", "String", "Box", "From",
    "Into",
];

/// Fixed names for punctuation and operator tokens.
fn symbol_name(token: &str) -> Option<&'static str> {
    let name = match token {
        "(" => "LeftParen",
        ")" => "RightParen",
        "[" => "LeftBracket",
        "]" => "RightBracket",
        "{" => "LeftBrace",
        "}" => "RightBrace",
        "<" => "LessThan",
        ">" => "GreaterThan",
        "," => "Comma",
        "." => "Dot",
        ":" => "Colon",
        ";" => "Semicolon",
        "+" => "Plus",
        "-" => "Minus",
        "*" => "Asterisk",
        "/" => "Slash",
        "%" => "Percent",
        "&" => "Ampersand",
        "|" => "Pipe",
        "^" => "Caret",
        "~" => "Tilde",
        "@" => "At",
        "\\" => "Backslash",
        "_" => "Underscore",
        "=" => "Equals",
        "==" => "Equality",
        "!=" => "NotEquals",
        "<=" => "LessEquals",
        ">=" => "GreaterEquals",
        "+=" => "PlusEquals",
        "-=" => "MinusEquals",
        "*=" => "TimesEquals",
        "/=" => "DivideEquals",
        "%=" => "ModEquals",
        "&=" => "AmpersandEquals",
        "|=" => "PipeEquals",
        "^=" => "CaretEquals",
        "@=" => "AtEquals",
        "//" => "FloorDiv",
        "//=" => "FloorDivEquals",
        "**" => "Power",
        "**=" => "PowerEquals",
        "<<" => "LeftShift",
        "<<=" => "LeftShiftEquals",
        ">>" => "RightShift",
        ">>=" => "RightShiftEquals",
        "->" => "Arrow",
        ":=" => "Walrus",
        "<>" => "NotEqualsAlt",
        "is not" => "IsNot",
        "not in" => "NotIn",
        "except*" => "ExceptStar",
        _ => return None,
    };
    Some(name)
}

/// Name of a single character inside a spelled-out token.
fn char_name(c: char) -> Option<&'static str> {
    let name = match c {
        '!' => "Bang",
        '?' => "Question",
        '#' => "Hash",
        '$' => "Dollar",
        '"' => "DoubleQuote",
        '\'' => "SingleQuote",
        '`' => "Backtick",
        ' ' => "Space",
        '\t' => "Tab",
        '\n' => "Newline",
        '\r' => "CarriageReturn",
        '\0' => "Nul",
        _ => {
            let mut buf = [0u8; 4];
            return symbol_name(c.encode_utf8(&mut buf));
        }
    };
    Some(name)
}

/// Words and multi-word keywords go through case conversion; anything else
/// is spelled out.
fn is_word_like(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphanumeric())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ')
}

fn spell_out(token: &str) -> String {
    let mut out = String::new();
    let mut word_start = true;
    for c in token.chars() {
        if c.is_ascii_alphanumeric() {
            if word_start {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            word_start = false;
            continue;
        }
        match char_name(c) {
            Some(name) => out.push_str(name),
            None => out.push_str(&format!("U{:04X}", c as u32)),
        }
        word_start = true;
    }
    out
}

/// Stem of an identifier before the suffix is appended.
fn stem(raw_type: &str) -> String {
    if let Some(name) = symbol_name(raw_type) {
        return name.to_string();
    }
    let stem = if is_word_like(raw_type) {
        to_pascal_case(raw_type)
    } else {
        spell_out(raw_type)
    };
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        format!("T{stem}")
    } else {
        stem
    }
}

/// Collision-free identifier allocation for one generation pass.
#[derive(Debug, Clone)]
pub struct NameResolver {
    token_suffix: String,
    issued: HashSet<String>,
}

impl NameResolver {
    pub fn new(token_suffix: impl Into<String>) -> Self {
        let mut resolver = Self {
            token_suffix: token_suffix.into(),
            issued: HashSet::new(),
        };
        for name in PRELUDE_NAMES {
            resolver.reserve(name);
        }
        resolver
    }

    /// Mark `name` as taken without issuing it to a grammar type.
    pub fn reserve(&mut self, name: &str) {
        self.issued.insert(name.to_string());
    }

    pub fn is_issued(&self, name: &str) -> bool {
        self.issued.contains(name)
    }

    /// Identifier for `raw_type`. Every call issues a new name, so the same
    /// type resolved twice gets a numbered second identifier.
    pub fn resolve(&mut self, raw_type: &str, named: bool) -> String {
        let suffix = if named {
            NAMED_SUFFIX
        } else {
            self.token_suffix.as_str()
        };
        let original = format!("{}{}", stem(raw_type), suffix);

        let mut name = original.clone();
        let mut counter = 1;
        while self.issued.contains(&name) {
            name = format!("{original}{counter}");
            counter += 1;
        }
        self.issued.insert(name.clone());
        name
    }

    /// Resolve every descriptor in declaration order.
    pub fn resolve_all(&mut self, nodes: &[RawNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| self.resolve(&node.type_name, node.named))
            .collect()
    }
}
