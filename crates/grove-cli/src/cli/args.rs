//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// `node-types.json` file (positional).
pub fn node_types_path_arg() -> Arg {
    Arg::new("node_types_path")
        .value_name("NODE_TYPES")
        .value_parser(value_parser!(PathBuf))
        .help("Path to node-types.json, or - for stdin")
}

/// Source file to parse (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Source file to parse, or - for stdin")
}

/// Inline source text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Inline source text")
}

/// Language flag (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .help("Language (inferred from extension if not specified)")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated Rust here instead of stdout")
}

/// Standalone type table (--table).
pub fn table_arg() -> Arg {
    Arg::new("table")
        .long("table")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Also write the type table as JSON")
}

/// Generated module name (--module-name).
pub fn module_name_arg() -> Arg {
    Arg::new("module_name")
        .long("module-name")
        .value_name("NAME")
        .help("Module name recorded for the bootstrap [default: language name or `generated`]")
}

/// Suffix for anonymous tokens (--token-suffix).
pub fn token_suffix_arg() -> Arg {
    Arg::new("token_suffix")
        .long("token-suffix")
        .value_name("SUFFIX")
        .default_value("TokenNode")
        .help("Identifier suffix for anonymous tokens")
}

/// Base type name (--base-type).
pub fn base_type_arg() -> Arg {
    Arg::new("base_type")
        .long("base-type")
        .value_name("NAME")
        .default_value("SyntaxNode")
        .help("Name of the universal base type")
}

/// Runtime crate path (--runtime-crate).
pub fn runtime_crate_arg() -> Arg {
    Arg::new("runtime_crate")
        .long("runtime-crate")
        .value_name("CRATE")
        .default_value("grove")
        .help("Crate the generated code refers to for runtime items")
}

/// Include anonymous nodes (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include anonymous nodes (literals, punctuation)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Show raw grammar types (--grammar-types).
pub fn grammar_types_arg() -> Arg {
    Arg::new("grammar_types")
        .long("grammar-types")
        .action(ArgAction::SetTrue)
        .help("Show the parser's grammar type next to each kind")
}

/// Depth limit (--depth).
pub fn depth_arg() -> Arg {
    Arg::new("depth")
        .long("depth")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Do not print nodes deeper than N")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .conflicts_with_all(["raw", "spans", "grammar_types", "depth"])
        .help("Print the tree as JSON")
}

/// Edit start byte (--start).
pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("BYTE")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("First byte replaced by the edit")
}

/// Edit old end byte (--end).
pub fn end_arg() -> Arg {
    Arg::new("end")
        .long("end")
        .value_name("BYTE")
        .value_parser(value_parser!(usize))
        .help("End of the replaced range, exclusive [default: START]")
}

/// Replacement text (--text).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .long("text")
        .value_name("TEXT")
        .default_value("")
        .help("Text inserted at START")
}

/// Print the edited text instead of the tree (--print-text).
pub fn print_text_arg() -> Arg {
    Arg::new("print_text")
        .long("print-text")
        .action(ArgAction::SetTrue)
        .help("Print the edited source text instead of the tree")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log verbosity (-v info, -vv debug, -vvv trace); GROVE_LOG overrides")
}
