//! Apply one edit through an incremental document.

use std::path::PathBuf;

use grove::{DumpOptions, dump};

use super::run_common::{fail, load_source, resolve_lang};

pub struct EditArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub start: usize,
    pub old_end: usize,
    pub text: String,
    pub dump: DumpOptions,
    pub print_text: bool,
}

pub fn run(args: EditArgs) {
    let source = load_source(args.source_text.as_deref(), args.source_path.as_deref());
    let lang = resolve_lang(args.lang.as_deref(), args.source_path.as_deref());
    let mut doc = lang.document(source).unwrap_or_else(|e| fail(e));

    let new_end =
        new_end_byte(args.start, &args.text).unwrap_or_else(|| fail("edit start is out of range"));
    if let Err(e) = doc.edit(args.start, args.old_end, new_end, &args.text) {
        fail(e);
    }

    if args.print_text {
        print!("{}", doc.text());
    } else {
        print!("{}", dump(doc.root(), &args.dump));
    }
}

/// End offset of `text` inserted at `start`, or `None` on overflow.
pub fn new_end_byte(start: usize, text: &str) -> Option<usize> {
    start.checked_add(text.len())
}
