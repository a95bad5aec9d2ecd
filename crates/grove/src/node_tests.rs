use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{FieldError, MaterializeError};
use crate::materialize::Materializer;
use crate::test_utils::{ToyNode, materialize, toy_registry};
use crate::text::Point;

// module
//   assignment          0..5
//   function_definition 6..15
const SOURCE: &str = "x = 1\ndef f(y):\n";

#[test]
fn accessors() {
    let root = materialize(SOURCE);
    assert_eq!(root.kind().identifier(), "ModuleNode");
    assert_eq!(root.grammar_type(), "module");
    assert!(root.is_named());
    assert_eq!(root.byte_range(), 0..SOURCE.len());
    assert_eq!(root.start_point(), Point::new(0, 0));
    assert_eq!(root.end_point(), Point::new(2, 0));
    assert_eq!(root.text(), SOURCE);
    assert_eq!(root.field_name(), None);
    assert_eq!(root.child_count(), 2);

    let func = root.child(1).unwrap();
    assert_eq!(func.kind().identifier(), "FunctionDefinitionNode");
    assert_eq!(func.byte_range(), 6..15);
    assert_eq!(func.start_point(), Point::new(1, 0));
    assert_eq!(func.end_point(), Point::new(1, 9));
    assert_eq!(func.text(), "def f(y):");
    assert_eq!(func.bytes(), b"def f(y):");
    assert!(root.child(2).is_none());
}

#[test]
fn field_lookup() {
    let root = materialize(SOURCE);
    let assignment = root.child(0).unwrap();

    let left = assignment.required_field("left").unwrap();
    assert_eq!(left.text(), "x");
    assert_eq!(left.field_name(), Some("left"));
    assert_eq!(assignment.optional_field("right").unwrap().text(), "1");
    assert!(assignment.optional_field("name").is_none());
    assert_eq!(assignment.field_children("left").count(), 1);

    let err = assignment.required_field("name").unwrap_err();
    assert_eq!(
        err,
        FieldError::RequiredFieldMissing {
            kind: "AssignmentNode".into(),
            field: "name".into(),
        }
    );
    insta::assert_snapshot!(err, @"`AssignmentNode` has no `name` child");
}

#[test]
fn named_children_skip_tokens() {
    let root = materialize(SOURCE);
    let func = root.child(1).unwrap();
    let named: Vec<_> = func.named_children().map(|c| c.text().into_owned()).collect();
    assert_eq!(named, ["f", "y"]);
    assert_eq!(func.child_count(), 6);
}

#[test]
fn descendants_are_preorder() {
    let root = materialize("x = 1\n");
    let kinds: Vec<_> = root
        .descendants()
        .map(|n| format!("{n:?}"))
        .collect();
    insta::assert_snapshot!(kinds.join("\n"), @r"
    ModuleNode@0..6
    AssignmentNode@0..5
    IdentifierNode@0..1
    EqualsTokenNode@2..3
    IntegerNode@4..5
    ");
}

#[test]
fn equality_is_kind_and_range() {
    let a = materialize(SOURCE);
    let b = materialize(SOURCE);
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert!(a.ptr_eq(&a.clone()));

    let set: HashSet<_> = [a.clone(), b].into_iter().collect();
    assert_eq!(set.len(), 1);

    // Same range, different kind.
    let other = materialize("x = 1\nabc f(y):\n");
    assert_ne!(a.child(1), other.child(1));
}

#[test]
fn insert_child_leaves_original_untouched() {
    let root = materialize(SOURCE);
    let extra = root.child(0).unwrap().clone();

    let edited = root.insert_child(1, extra.clone());
    assert_eq!(edited.child_count(), 3);
    assert_eq!(root.child_count(), 2);
    assert!(edited.child(2).unwrap().ptr_eq(root.child(1).unwrap()));

    let appended = root.insert_child(99, extra);
    assert_eq!(appended.child_count(), 3);
    assert_eq!(appended.child(2), root.child(0));
}

#[test]
fn replace_and_delete_act_on_every_equal_child() {
    let root = materialize(SOURCE);
    let assignment = root.child(0).unwrap().clone();
    let func = root.child(1).unwrap().clone();

    let doubled = root.insert_child(0, assignment.clone());
    let replaced = doubled.replace_child(&assignment, func.clone());
    assert_eq!(replaced.children(), [func.clone(), func.clone(), func.clone()]);

    let deleted = doubled.delete_child(&assignment);
    assert_eq!(deleted.children(), [func.clone()]);

    let untouched = root.delete_child(&root);
    assert_eq!(untouched.children(), root.children());
}

#[test]
fn with_field_name_and_span() {
    let root = materialize(SOURCE);
    let func = root.child(1).unwrap();

    let tagged = func.with_field_name(Some("body"));
    assert_eq!(tagged.field_name(), Some("body"));
    assert_eq!(func.field_name(), None);

    let narrowed = func
        .with_span(6..9, Point::new(1, 0), Point::new(1, 3))
        .unwrap();
    assert_eq!(narrowed.text(), "def");
    assert_ne!(&narrowed, func);

    let err = func
        .with_span(6..100, Point::new(1, 0), Point::new(1, 94))
        .unwrap_err();
    assert!(matches!(err, MaterializeError::InvalidRange { len: 16, .. }));
}

#[test]
fn path_edits_share_untouched_subtrees() {
    let root = materialize(SOURCE);
    let name = root.child(1).unwrap().required_field("name").unwrap();

    let path = root.path_to(&name).unwrap();
    assert_eq!(path, [1, 1]);
    assert_eq!(root.node_at(&path), Some(&name));
    assert!(root.node_at(&[5]).is_none());
    assert_eq!(root.path_to(&root), Some(vec![]));

    let renamed = name.with_field_name(None);
    let new_root = root.replace_descendant(&name, renamed).unwrap();
    assert!(new_root.child(0).unwrap().ptr_eq(root.child(0).unwrap()));
    assert!(!new_root.child(1).unwrap().ptr_eq(root.child(1).unwrap()));
    assert_eq!(new_root.node_at(&path).unwrap().field_name(), None);
    assert_eq!(root.node_at(&path).unwrap().field_name(), Some("name"));

    assert!(root.replace_at(&[0, 9], name.clone()).is_none());
    let detached = materialize("zzz");
    assert!(root.replace_descendant(detached.child(0).unwrap(), name).is_none());
}

#[test]
fn text_drops_invalid_utf8() {
    let source: Arc<[u8]> = Arc::from(&b"a\xffb"[..]);
    let raw = ToyNode::new("module", true, 0..3);
    let node = Materializer::new(&toy_registry()).build(&raw, &source).unwrap();
    assert_eq!(node.text(), "ab");
    assert_eq!(node.bytes(), b"a\xffb");
}

#[test]
fn serializes_to_json() {
    let root = materialize("x = 1");
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["kind"], "ModuleNode");
    assert_eq!(json["type"], "module");
    assert_eq!(json["children"][0]["kind"], "AssignmentNode");
    let left = &json["children"][0]["children"][0];
    assert_eq!(left["field"], "left");
    assert_eq!(left["text"], "x");
    assert_eq!(left["start_point"], serde_json::json!({"row": 0, "column": 0}));
    assert_eq!(left["end_byte"], 1);
}
