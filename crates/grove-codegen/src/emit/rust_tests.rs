use grove_core::{Cardinality, FieldDef, FieldTypeRef, NodeTypeDef, TypeTable};

use super::rust::{emit_rust, field_element, method_name, raw_string_literal, Element};
use crate::GenerateConfig;

fn leaf(grammar_type: &str, identifier: &str) -> NodeTypeDef {
    NodeTypeDef {
        grammar_type: grammar_type.into(),
        named: true,
        identifier: identifier.into(),
        parent: None,
        kinds: vec![identifier.into()],
        fields: vec![],
    }
}

fn field(name: &str, multiple: bool, required: bool, types: &[(&str, Option<&str>)]) -> FieldDef {
    FieldDef {
        name: name.into(),
        cardinality: Cardinality { multiple, required },
        types: types
            .iter()
            .map(|(grammar_type, identifier)| FieldTypeRef {
                grammar_type: (*grammar_type).into(),
                named: true,
                identifier: identifier.map(Into::into),
            })
            .collect(),
    }
}

fn emit(table: &TypeTable) -> String {
    emit_rust(table, &GenerateConfig::default(), "{}")
}

#[test]
fn emit_single_leaf_module() {
    let mut table = TypeTable::new("SyntaxNode");
    table.types.push(leaf("identifier", "IdentifierNode"));

    insta::assert_snapshot!(emit(&table), @r##"
    // @generated by grove-codegen. Do not edit.
    // Module `generated`: 1 node types.

    /// Universal base of every generated node type.
    pub type SyntaxNode = ::grove::Node;

    /// `identifier` (named).
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct IdentifierNode(::grove::Node);

    impl ::grove::TypedNode for IdentifierNode {
        const GRAMMAR_TYPE: &'static str = "identifier";
        const NAMED: bool = true;
        const IDENTIFIER: &'static str = "IdentifierNode";
        const KINDS: &'static [&'static str] = &["IdentifierNode"];

        fn from_node_unchecked(node: ::grove::Node) -> Self {
            Self(node)
        }

        fn as_node(&self) -> &::grove::Node {
            &self.0
        }
    }

    impl IdentifierNode {
        pub fn upcast(self) -> SyntaxNode {
            self.0
        }

        pub fn insert_child(&self, index: usize, child: impl Into<::grove::Node>) -> Self {
            Self(self.0.insert_child(index, child.into()))
        }

        pub fn replace_child(&self, old: &::grove::Node, new: impl Into<::grove::Node>) -> Self {
            Self(self.0.replace_child(old, new.into()))
        }

        pub fn delete_child(&self, child: &::grove::Node) -> Self {
            Self(self.0.delete_child(child))
        }
    }

    impl ::std::ops::Deref for IdentifierNode {
        type Target = ::grove::Node;

        fn deref(&self) -> &::grove::Node {
            &self.0
        }
    }

    impl From<IdentifierNode> for ::grove::Node {
        fn from(value: IdentifierNode) -> Self {
            value.0
        }
    }

    impl From<IdentifierNode> for AnyNode {
        fn from(value: IdentifierNode) -> Self {
            Self::IdentifierNode(value)
        }
    }

    /// Any node of this grammar, dispatched on its registered kind.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum AnyNode {
        IdentifierNode(IdentifierNode),
        Unknown(::grove::Node),
    }

    impl From<::grove::Node> for AnyNode {
        fn from(node: ::grove::Node) -> Self {
            match node.kind().identifier() {
                "IdentifierNode" => Self::IdentifierNode(IdentifierNode(node)),
                _ => Self::Unknown(node),
            }
        }
    }

    impl AnyNode {
        pub fn as_node(&self) -> &::grove::Node {
            match self {
                Self::IdentifierNode(n) => &n.0,
                Self::Unknown(n) => n,
            }
        }

        pub fn into_node(self) -> ::grove::Node {
            match self {
                Self::IdentifierNode(n) => n.0,
                Self::Unknown(n) => n,
            }
        }
    }

    impl From<AnyNode> for ::grove::Node {
        fn from(value: AnyNode) -> Self {
            value.into_node()
        }
    }

    /// Type table of this module.
    pub const TYPE_TABLE_JSON: &str = r#"{}"#;

    /// Handle for loading this module through the bootstrap.
    pub const MODULE: ::grove::ModuleRef =
        ::grove::ModuleRef::embedded("generated", TYPE_TABLE_JSON);

    /// Merge this module's types into `registry`.
    pub fn register(
        registry: &mut ::grove::TypeRegistry,
    ) -> Result<(), ::grove::RegistrationError> {
        registry.load(&MODULE)
    }
    "##);
}

#[test]
fn accessors_follow_cardinality() {
    let mut table = TypeTable::new("SyntaxNode");
    let mut func = leaf("function_definition", "FunctionDefinitionNode");
    func.fields = vec![
        field("name", false, true, &[("identifier", Some("IdentifierNode"))]),
        field("return_type", false, false, &[("type", Some("TypeNode"))]),
        field("decorators", true, false, &[("decorator", Some("DecoratorNode"))]),
    ];
    table.types.push(func);

    let source = emit(&table);
    assert!(source.contains(
        "    pub fn name(&self) -> Result<IdentifierNode, ::grove::FieldError> {\n        self.0.required_field(\"name\").map(IdentifierNode)\n"
    ));
    assert!(source.contains(
        "    pub fn return_type(&self) -> Option<TypeNode> {\n        self.0.optional_field(\"return_type\").map(TypeNode)\n"
    ));
    assert!(source.contains(
        "    pub fn decorators(&self) -> Vec<DecoratorNode> {\n        self.0.field_children(\"decorators\").map(DecoratorNode).collect()\n"
    ));
}

#[test]
fn union_and_unresolved_fields() {
    let mut table = TypeTable::new("SyntaxNode");
    let mut call = leaf("call", "CallNode");
    call.fields = vec![
        field(
            "function",
            false,
            true,
            &[("identifier", Some("IdentifierNode")), ("attribute", Some("AttributeNode"))],
        ),
        field("arguments", true, true, &[("missing", None)]),
    ];
    table.types.push(call);

    let source = emit(&table);
    assert!(source.contains("pub fn function(&self) -> Result<AnyNode, ::grove::FieldError>"));
    assert!(source.contains(".map(AnyNode::from)"));
    assert!(source.contains(
        "    pub fn arguments(&self) -> Vec<SyntaxNode> {\n        self.0.field_children(\"arguments\").collect()\n"
    ));
}

#[test]
fn subtype_converts_into_parent() {
    let mut table = TypeTable::new("SyntaxNode");
    let mut ident = leaf("identifier", "IdentifierNode");
    ident.parent = Some("ExpressionNode".into());
    let mut expr = leaf("expression", "ExpressionNode");
    expr.kinds = vec!["ExpressionNode".into(), "IdentifierNode".into()];
    table.types.push(ident);
    table.types.push(expr);

    let source = emit(&table);
    assert!(source.contains("    pub fn upcast(self) -> ExpressionNode {\n        ExpressionNode(self.0)\n"));
    assert!(source.contains("impl From<IdentifierNode> for ExpressionNode {"));
    assert!(source.contains(
        "const KINDS: &'static [&'static str] = &[\"ExpressionNode\", \"IdentifierNode\"];"
    ));
}

#[test]
fn base_named_node_emits_no_alias() {
    let mut table = TypeTable::new("Node");
    table.types.push(leaf("identifier", "IdentifierNode"));
    let config = GenerateConfig::default().with_base_type_name("Node");

    let source = emit_rust(&table, &config, "{}");
    assert!(!source.contains("pub type"));
    assert!(source.contains("    pub fn upcast(self) -> ::grove::Node {"));
}

#[test]
fn anonymous_grammar_type_is_escaped() {
    let mut table = TypeTable::new("SyntaxNode");
    let mut quote = leaf("\"", "DoubleQuoteTokenNode");
    quote.named = false;
    table.types.push(quote);

    let source = emit(&table);
    assert!(source.contains("/// `\\\"` (anonymous)."));
    assert!(source.contains("const GRAMMAR_TYPE: &'static str = \"\\\"\";"));
    assert!(source.contains("const NAMED: bool = false;"));
}

#[test]
fn field_method_names() {
    assert_eq!(method_name("name"), "name");
    assert_eq!(method_name("type"), "r#type");
    assert_eq!(method_name("async"), "r#async");
    assert_eq!(method_name("self"), "self_");
    assert_eq!(method_name("upcast"), "upcast_field");
    assert_eq!(method_name("insert_child"), "insert_child_field");
    assert_eq!(method_name("left-hand"), "left_hand");
    assert_eq!(method_name("0"), "f_0");
}

#[test]
fn colliding_field_methods_are_numbered() {
    let mut table = TypeTable::new("SyntaxNode");
    let mut node = leaf("pair", "PairNode");
    node.fields = vec![
        field("left-hand", false, false, &[]),
        field("left_hand", false, false, &[]),
    ];
    table.types.push(node);

    let source = emit(&table);
    assert!(source.contains("pub fn left_hand(&self) -> Option<SyntaxNode>"));
    assert!(source.contains("pub fn left_hand1(&self) -> Option<SyntaxNode>"));
    assert!(source.contains("self.0.optional_field(\"left-hand\")"));
}

#[test]
fn element_type_selection() {
    let single = field("a", false, true, &[("x", Some("XNode"))]);
    assert_eq!(field_element(&single), Element::Concrete("XNode".into()));

    let union = field("a", false, true, &[("x", Some("XNode")), ("y", Some("YNode"))]);
    assert_eq!(field_element(&union), Element::Any);

    let partial = field("a", false, true, &[("x", Some("XNode")), ("z", None)]);
    assert_eq!(field_element(&partial), Element::Base);

    let empty = field("a", false, true, &[]);
    assert_eq!(field_element(&empty), Element::Base);
}

#[test]
fn raw_literal_hash_count() {
    assert_eq!(raw_string_literal("{}"), "r#\"{}\"#");
    assert_eq!(raw_string_literal("\"#\""), "r##\"\"#\"\"##");
    assert_eq!(raw_string_literal("\"##"), "r###\"\"##\"###");
}
