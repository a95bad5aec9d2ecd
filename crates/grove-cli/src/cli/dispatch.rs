//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use grove_codegen::GenerateConfig;

use crate::commands::ast::AstArgs;
use crate::commands::edit::EditArgs;
use crate::commands::generate::GenArgs;

pub struct GenParams {
    pub node_types_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub module_name: Option<String>,
    pub token_suffix: String,
    pub base_type: String,
    pub runtime_crate: String,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            node_types_path: m.get_one::<PathBuf>("node_types_path").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            table: m.get_one::<PathBuf>("table").cloned(),
            module_name: m.get_one::<String>("module_name").cloned(),
            token_suffix: string_or_default(m, "token_suffix"),
            base_type: string_or_default(m, "base_type"),
            runtime_crate: string_or_default(m, "runtime_crate"),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        // Language name first, then the generator default.
        let module_name = p
            .module_name
            .or_else(|| p.lang.clone())
            .unwrap_or_else(|| GenerateConfig::default().module_name);
        Self {
            node_types_path: p.node_types_path,
            lang: p.lang,
            output: p.output,
            table: p.table,
            config: GenerateConfig {
                token_suffix: p.token_suffix,
                base_type_name: p.base_type,
                module_name,
                runtime_crate: p.runtime_crate,
            },
        }
    }
}

pub struct AstParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub grammar_types: bool,
    pub depth: Option<usize>,
    pub json: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            grammar_types: m.get_flag("grammar_types"),
            depth: m.get_one::<usize>("depth").copied(),
            json: m.get_flag("json"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            dump: grove::DumpOptions {
                anonymous: p.raw,
                spans: p.spans,
                grammar_types: p.grammar_types,
                max_depth: p.depth,
            },
            json: p.json,
        }
    }
}

pub struct EditParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub start: usize,
    pub end: Option<usize>,
    pub text: String,
    pub raw: bool,
    pub spans: bool,
    pub print_text: bool,
}

impl EditParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            start: m.get_one::<usize>("start").copied().unwrap_or_default(),
            end: m.get_one::<usize>("end").copied(),
            text: string_or_default(m, "text"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            print_text: m.get_flag("print_text"),
        }
    }
}

impl From<EditParams> for EditArgs {
    fn from(p: EditParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            start: p.start,
            old_end: p.end.unwrap_or(p.start),
            text: p.text,
            dump: grove::DumpOptions {
                anonymous: p.raw,
                spans: p.spans,
                ..grove::DumpOptions::default()
            },
            print_text: p.print_text,
        }
    }
}

fn string_or_default(m: &ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}
