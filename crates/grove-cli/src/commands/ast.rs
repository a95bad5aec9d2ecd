//! Parse source and print its materialized tree.

use std::path::PathBuf;

use grove::{DumpOptions, Node, dump};

use super::run_common::{fail, load_source, resolve_lang};

pub struct AstArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub dump: DumpOptions,
    pub json: bool,
}

pub fn run(args: AstArgs) {
    let source = load_source(args.source_text.as_deref(), args.source_path.as_deref());
    let lang = resolve_lang(args.lang.as_deref(), args.source_path.as_deref());
    let mut parser = lang.parser().unwrap_or_else(|e| fail(e));
    let root = parser.parse(&source).unwrap_or_else(|e| fail(e));
    print!("{}", render(&root, &args.dump, args.json));
}

/// Tree text for `root`: JSON, or the indented dump.
pub fn render(root: &Node, options: &DumpOptions, json: bool) -> String {
    if json {
        match serde_json::to_string_pretty(root) {
            Ok(s) => s + "\n",
            Err(e) => fail(e),
        }
    } else {
        dump(root, options)
    }
}
