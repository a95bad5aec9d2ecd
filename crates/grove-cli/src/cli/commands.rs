//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("grove")
        .about("Typed concrete-syntax trees for tree-sitter grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(gen_command())
        .subcommand(ast_command())
        .subcommand(edit_command())
        .subcommand(langs_command())
}

/// Generate a Rust node model from `node-types.json`.
pub fn gen_command() -> Command {
    Command::new("gen")
        .about("Generate typed Rust nodes from node-types.json")
        .override_usage(
            "\
  grove gen <NODE_TYPES> [-o <FILE>] [--table <FILE>]
  grove gen -l <LANG> [-o <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  grove gen src/node-types.json -o src/nodes.rs     # from a grammar checkout
  grove gen -l python --table python.types.json     # bundled grammar, plus table
  grove gen node-types.json --token-suffix Token    # `Token` for anonymous nodes"#,
        )
        .arg(node_types_path_arg().required_unless_present("lang"))
        .arg(lang_arg().conflicts_with("node_types_path"))
        .arg(output_arg())
        .arg(table_arg())
        .arg(module_name_arg())
        .arg(token_suffix_arg())
        .arg(base_type_arg())
        .arg(runtime_crate_arg())
}

/// Parse a source file and print its materialized tree.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Parse source and print its typed tree")
        .override_usage(
            "\
  grove ast <SOURCE>
  grove ast -s <TEXT> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  grove ast app.py                   # named nodes
  grove ast app.py --raw --spans     # every node, with positions
  grove ast -s 'x = 1' -l py --json  # inline source, JSON output"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(grammar_types_arg())
        .arg(depth_arg())
        .arg(json_arg())
}

/// Apply one edit incrementally and print the result.
pub fn edit_command() -> Command {
    Command::new("edit")
        .about("Apply an edit to source and print the reparsed tree")
        .override_usage(
            "\
  grove edit <SOURCE> --start <BYTE> [--end <BYTE>] [--text <TEXT>]
  grove edit -s <TEXT> -l <LANG> --start <BYTE> ...",
        )
        .after_help(
            r#"EXAMPLES:
  grove edit -s 'x = 1' -l py --start 4 --end 5 --text 2   # replace
  grove edit app.py --start 0 --text '# header\n'          # insert
  grove edit app.py --start 10 --end 20 --print-text       # delete"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(start_arg())
        .arg(end_arg())
        .arg(text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(print_text_arg())
}

/// List bundled languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}
