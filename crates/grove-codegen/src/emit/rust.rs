//! Rust source renderer for a type table.
//!
//! The output is a single module: one newtype per grammar type wrapping the
//! runtime node, a closed `AnyNode` sum type, and the embedded type table
//! the runtime bootstrap loads. All runtime items are referenced through
//! absolute paths so the module can be `include!`d anywhere.

use std::collections::HashSet;

use grove_core::utils::is_plain_identifier;
use grove_core::{FieldDef, NodeTypeDef, TypeTable};

use crate::config::{ANY_NODE, GenerateConfig, UNKNOWN_VARIANT};

/// Methods every generated type defines itself; fields with these names
/// get a `_field` suffix.
const HELPER_METHODS: &[&str] = &[
    "upcast",
    "insert_child",
    "replace_child",
    "delete_child",
    "as_node",
    "cast",
];

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// How a field accessor wraps the child nodes it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Concrete(String),
    Any,
    Base,
}

pub(crate) fn field_element(field: &FieldDef) -> Element {
    if field.types.is_empty() || !field.is_resolved() {
        return Element::Base;
    }
    let mut idents = field.types.iter().filter_map(|t| t.identifier.as_deref());
    let Some(first) = idents.next() else {
        return Element::Base;
    };
    if idents.all(|i| i == first) {
        Element::Concrete(first.to_string())
    } else {
        Element::Any
    }
}

/// Method name for a grammar field name.
pub(crate) fn method_name(field: &str) -> String {
    let mut name: String = field
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name = format!("f_{name}");
    }
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    } else if KEYWORDS.contains(&name.as_str()) {
        name = format!("r#{name}");
    } else if HELPER_METHODS.contains(&name.as_str()) {
        name.push_str("_field");
    }
    name
}

/// Shortest raw string literal that holds `s`.
pub(crate) fn raw_string_literal(s: &str) -> String {
    let mut longest = 0;
    let mut run: Option<usize> = None;
    for c in s.chars() {
        match (c, run) {
            ('"', _) => run = Some(0),
            ('#', Some(n)) => {
                run = Some(n + 1);
                longest = longest.max(n + 1);
            }
            _ => run = None,
        }
    }
    let hashes = "#".repeat(longest + 1);
    format!("r{hashes}\"{s}\"{hashes}")
}

struct Emitter<'a> {
    table: &'a TypeTable,
    config: &'a GenerateConfig,
    /// `::<runtime_crate>`
    rt: String,
    /// Type used for the universal base: the alias, or the runtime node.
    base_ty: String,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(table: &'a TypeTable, config: &'a GenerateConfig) -> Self {
        let rt = format!("::{}", config.runtime_crate);
        let base_ty = if emits_base_alias(config) {
            config.base_type_name.clone()
        } else {
            format!("{rt}::Node")
        };
        Self {
            table,
            config,
            rt,
            base_ty,
            output: String::new(),
        }
    }

    fn line(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn emit(mut self, table_json: &str) -> String {
        self.emit_header();
        let table = self.table;
        for def in &table.types {
            self.emit_type(def);
        }
        self.emit_any_node();
        self.emit_footer(table_json);
        self.output
    }

    fn emit_header(&mut self) {
        self.line("// @generated by grove-codegen. Do not edit.");
        self.line(&format!(
            "// Module `{}`: {} node types.",
            self.config.module_name.escape_debug(),
            self.table.len()
        ));
        self.line("");
        if emits_base_alias(self.config) {
            self.line("/// Universal base of every generated node type.");
            self.line(&format!(
                "pub type {} = {}::Node;",
                self.config.base_type_name, self.rt
            ));
            self.line("");
        }
    }

    fn emit_type(&mut self, def: &NodeTypeDef) {
        let rt = self.rt.clone();
        let ident = &def.identifier;
        let form = if def.named { "named" } else { "anonymous" };

        self.line(&format!(
            "/// `{}` ({form}).",
            def.grammar_type.escape_debug()
        ));
        self.line("#[derive(Debug, Clone, PartialEq, Eq, Hash)]");
        self.line(&format!("pub struct {ident}({rt}::Node);"));
        self.line("");

        // TypedNode
        let kinds: Vec<String> = kinds_of(def).iter().map(|k| format!("{k:?}")).collect();
        self.line(&format!("impl {rt}::TypedNode for {ident} {{"));
        self.line(&format!(
            "    const GRAMMAR_TYPE: &'static str = {:?};",
            def.grammar_type
        ));
        self.line(&format!("    const NAMED: bool = {};", def.named));
        self.line(&format!("    const IDENTIFIER: &'static str = {ident:?};"));
        self.line(&format!(
            "    const KINDS: &'static [&'static str] = &[{}];",
            kinds.join(", ")
        ));
        self.line("");
        self.line(&format!(
            "    fn from_node_unchecked(node: {rt}::Node) -> Self {{"
        ));
        self.line("        Self(node)");
        self.line("    }");
        self.line("");
        self.line(&format!("    fn as_node(&self) -> &{rt}::Node {{"));
        self.line("        &self.0");
        self.line("    }");
        self.line("}");
        self.line("");

        // Inherent methods
        self.line(&format!("impl {ident} {{"));
        let mut used: HashSet<String> = HashSet::new();
        for field in &def.fields {
            let mut name = method_name(&field.name);
            let stem = name.clone();
            let mut counter = 1;
            while !used.insert(name.clone()) {
                name = format!("{stem}{counter}");
                counter += 1;
            }
            self.emit_accessor(&name, field);
        }
        self.emit_helpers(def);
        self.line("}");
        self.line("");

        // Conversions
        self.line(&format!("impl ::std::ops::Deref for {ident} {{"));
        self.line(&format!("    type Target = {rt}::Node;"));
        self.line("");
        self.line(&format!("    fn deref(&self) -> &{rt}::Node {{"));
        self.line("        &self.0");
        self.line("    }");
        self.line("}");
        self.line("");
        self.emit_from(ident, &format!("{rt}::Node"), "value.0");
        if let Some(parent) = &def.parent {
            self.emit_from(ident, parent, &format!("{parent}(value.0)"));
        }
        self.emit_from(ident, ANY_NODE, &format!("Self::{ident}(value)"));
    }

    fn emit_from(&mut self, from: &str, to: &str, body: &str) {
        self.line(&format!("impl From<{from}> for {to} {{"));
        self.line(&format!("    fn from(value: {from}) -> Self {{"));
        self.line(&format!("        {body}"));
        self.line("    }");
        self.line("}");
        self.line("");
    }

    fn emit_accessor(&mut self, method: &str, field: &FieldDef) {
        let rt = self.rt.clone();
        let element = field_element(field);
        let ty = match &element {
            Element::Concrete(ident) => ident.clone(),
            Element::Any => ANY_NODE.to_string(),
            Element::Base => self.base_ty.clone(),
        };
        let wrap = match &element {
            Element::Concrete(ident) => format!(".map({ident})"),
            Element::Any => format!(".map({ANY_NODE}::from)"),
            Element::Base => String::new(),
        };
        let literal = format!("{:?}", field.name);
        let doc_name = field.name.escape_debug();

        if field.cardinality.multiple {
            self.line(&format!("    /// Children in the `{doc_name}` field."));
            self.line(&format!("    pub fn {method}(&self) -> Vec<{ty}> {{"));
            self.line(&format!(
                "        self.0.field_children({literal}){wrap}.collect()"
            ));
        } else if field.cardinality.required {
            self.line(&format!("    /// The required `{doc_name}` field."));
            self.line(&format!(
                "    pub fn {method}(&self) -> Result<{ty}, {rt}::FieldError> {{"
            ));
            self.line(&format!("        self.0.required_field({literal}){wrap}"));
        } else {
            self.line(&format!("    /// The optional `{doc_name}` field."));
            self.line(&format!("    pub fn {method}(&self) -> Option<{ty}> {{"));
            self.line(&format!("        self.0.optional_field({literal}){wrap}"));
        }
        self.line("    }");
        self.line("");
    }

    fn emit_helpers(&mut self, def: &NodeTypeDef) {
        let rt = self.rt.clone();
        let (parent_ty, upcast_body) = match &def.parent {
            Some(parent) => (parent.clone(), format!("{parent}(self.0)")),
            None => (self.base_ty.clone(), "self.0".to_string()),
        };

        self.line(&format!("    pub fn upcast(self) -> {parent_ty} {{"));
        self.line(&format!("        {upcast_body}"));
        self.line("    }");
        self.line("");
        self.line(&format!(
            "    pub fn insert_child(&self, index: usize, child: impl Into<{rt}::Node>) -> Self {{"
        ));
        self.line("        Self(self.0.insert_child(index, child.into()))");
        self.line("    }");
        self.line("");
        self.line(&format!(
            "    pub fn replace_child(&self, old: &{rt}::Node, new: impl Into<{rt}::Node>) -> Self {{"
        ));
        self.line("        Self(self.0.replace_child(old, new.into()))");
        self.line("    }");
        self.line("");
        self.line(&format!(
            "    pub fn delete_child(&self, child: &{rt}::Node) -> Self {{"
        ));
        self.line("        Self(self.0.delete_child(child))");
        self.line("    }");
    }

    fn emit_any_node(&mut self) {
        let rt = self.rt.clone();
        let idents: Vec<String> = self
            .table
            .types
            .iter()
            .map(|t| t.identifier.clone())
            .collect();

        self.line("/// Any node of this grammar, dispatched on its registered kind.");
        self.line("#[derive(Debug, Clone, PartialEq, Eq, Hash)]");
        self.line(&format!("pub enum {ANY_NODE} {{"));
        for ident in &idents {
            self.line(&format!("    {ident}({ident}),"));
        }
        self.line(&format!("    {UNKNOWN_VARIANT}({rt}::Node),"));
        self.line("}");
        self.line("");

        self.line(&format!("impl From<{rt}::Node> for {ANY_NODE} {{"));
        self.line(&format!("    fn from(node: {rt}::Node) -> Self {{"));
        self.line("        match node.kind().identifier() {");
        for ident in &idents {
            self.line(&format!(
                "            {ident:?} => Self::{ident}({ident}(node)),"
            ));
        }
        self.line(&format!("            _ => Self::{UNKNOWN_VARIANT}(node),"));
        self.line("        }");
        self.line("    }");
        self.line("}");
        self.line("");

        self.line(&format!("impl {ANY_NODE} {{"));
        self.line(&format!("    pub fn as_node(&self) -> &{rt}::Node {{"));
        self.line("        match self {");
        for ident in &idents {
            self.line(&format!("            Self::{ident}(n) => &n.0,"));
        }
        self.line(&format!("            Self::{UNKNOWN_VARIANT}(n) => n,"));
        self.line("        }");
        self.line("    }");
        self.line("");
        self.line(&format!("    pub fn into_node(self) -> {rt}::Node {{"));
        self.line("        match self {");
        for ident in &idents {
            self.line(&format!("            Self::{ident}(n) => n.0,"));
        }
        self.line(&format!("            Self::{UNKNOWN_VARIANT}(n) => n,"));
        self.line("        }");
        self.line("    }");
        self.line("}");
        self.line("");

        self.emit_from(ANY_NODE, &format!("{rt}::Node"), "value.into_node()");
    }

    fn emit_footer(&mut self, table_json: &str) {
        let rt = self.rt.clone();
        self.line("/// Type table of this module.");
        self.line(&format!(
            "pub const TYPE_TABLE_JSON: &str = {};",
            raw_string_literal(table_json)
        ));
        self.line("");
        self.line("/// Handle for loading this module through the bootstrap.");
        self.line(&format!("pub const MODULE: {rt}::ModuleRef ="));
        self.line(&format!(
            "    {rt}::ModuleRef::embedded({:?}, TYPE_TABLE_JSON);",
            self.config.module_name
        ));
        self.line("");
        self.line("/// Merge this module's types into `registry`.");
        self.line("pub fn register(");
        self.line(&format!("    registry: &mut {rt}::TypeRegistry,"));
        self.line(&format!(") -> Result<(), {rt}::RegistrationError> {{"));
        self.line("    registry.load(&MODULE)");
        self.line("}");
    }
}

fn emits_base_alias(config: &GenerateConfig) -> bool {
    config.base_type_name != "Node"
}

/// The type itself followed by its subtypes, without repeats.
fn kinds_of(def: &NodeTypeDef) -> Vec<&str> {
    let mut kinds = vec![def.identifier.as_str()];
    for kind in &def.kinds {
        if !kinds.contains(&kind.as_str()) {
            kinds.push(kind.as_str());
        }
    }
    kinds
}

/// Render `table` as a Rust module. `table_json` is embedded verbatim.
pub fn emit_rust(table: &TypeTable, config: &GenerateConfig, table_json: &str) -> String {
    debug_assert!(is_plain_identifier(&config.runtime_crate));
    Emitter::new(table, config).emit(table_json)
}
