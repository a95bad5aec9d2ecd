//! Generate a typed Rust node model from `node-types.json`.

use std::fs;
use std::path::PathBuf;

use grove_codegen::{GenerateConfig, GeneratedModule, generate_from_json};

use super::run_common::{fail, read_input, resolve_lang};

pub struct GenArgs {
    pub node_types_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub config: GenerateConfig,
}

pub fn run(args: GenArgs) {
    let json = match &args.node_types_path {
        Some(path) => read_input(path).unwrap_or_else(|msg| fail(msg)),
        None => resolve_lang(args.lang.as_deref(), None)
            .node_types_json()
            .to_string(),
    };

    let module = generate_from_json(&json, &args.config).unwrap_or_else(|e| fail(e));
    tracing::info!(
        module = %args.config.module_name,
        types = module.table.len(),
        "generated module"
    );
    write_outputs(&args, &module);
}

fn write_outputs(args: &GenArgs, module: &GeneratedModule) {
    if let Some(path) = &args.table {
        let json = module.table_json().unwrap_or_else(|e| fail(e));
        if let Err(e) = fs::write(path, json + "\n") {
            fail(format!("failed to write '{}': {}", path.display(), e));
        }
    }

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &module.source) {
                fail(format!("failed to write '{}': {}", path.display(), e));
            }
        }
        None => print!("{}", module.source),
    }
}
