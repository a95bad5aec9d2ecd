use super::*;

#[test]
#[cfg(feature = "lang-javascript")]
fn lang_from_name() {
    assert_eq!(from_name("js").unwrap().name(), "javascript");
    assert_eq!(from_name("JavaScript").unwrap().name(), "javascript");
    assert!(from_name("unknown").is_none());
}

#[test]
#[cfg(feature = "lang-python")]
fn lang_from_extension() {
    assert_eq!(from_ext("py").unwrap().name(), "python");
    assert_eq!(from_ext("PYI").unwrap().name(), "python");
    assert!(from_ext("nope").is_none());
}

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    assert!(!langs.is_empty());
    for lang in &langs {
        assert!(!lang.name().is_empty());
        assert!(!lang.extensions().is_empty());
        assert!(lang.aliases().contains(&lang.name()));
        assert_eq!(lang.module().name(), lang.name());
    }
}

#[test]
fn every_lang_registers_its_types() {
    for lang in all() {
        let registry = lang.registry().unwrap();
        assert!(!registry.is_empty(), "{} registered no types", lang.name());
    }
}

#[test]
fn bundled_node_types_match_the_registry() {
    for lang in all() {
        let nodes = grove_core::parse_node_types(lang.node_types_json()).unwrap();
        let registry = lang.registry().unwrap();
        assert_eq!(nodes.len(), registry.len(), "{}", lang.name());
    }
}

#[test]
#[cfg(feature = "lang-json")]
fn json_document() {
    let doc = json::lang().document("{\"a\": [1, 2]}").unwrap();
    assert_eq!(doc.root().kind().identifier(), "DocumentNode");
    let pair = doc
        .root()
        .descendants()
        .find(|n| n.grammar_type() == "pair")
        .unwrap();
    assert_eq!(pair.required_field("key").unwrap().text(), "\"a\"");
}
