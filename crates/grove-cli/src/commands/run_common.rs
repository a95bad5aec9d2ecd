//! Input loading and language resolution shared by commands.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use grove_langs::Lang;

/// Print `error: <msg>` and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1)
}

/// Read a file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Load source code from file, stdin, or inline text.
pub fn load_source(source_text: Option<&str>, source_path: Option<&Path>) -> String {
    if let Some(text) = source_text {
        return text.to_owned();
    }
    match source_path {
        Some(path) => read_input(path).unwrap_or_else(|msg| fail(msg)),
        None => fail("source required: pass a file, - for stdin, or -s <TEXT>"),
    }
}

/// Language from `--lang`, or from the source file's extension.
pub fn find_lang(lang_name: Option<&str>, source_path: Option<&Path>) -> Result<Lang, String> {
    if let Some(name) = lang_name {
        return grove_langs::from_name(name).ok_or_else(|| format!("unknown language: '{}'", name));
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return grove_langs::from_ext(ext).ok_or_else(|| {
            format!("cannot infer language from extension '.{}', use --lang", ext)
        });
    }

    Err("--lang is required (cannot infer from input)".to_string())
}

/// Resolve source language from --lang flag or file extension.
pub fn resolve_lang(lang_name: Option<&str>, source_path: Option<&Path>) -> Lang {
    find_lang(lang_name, source_path).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        eprintln!();
        eprintln!("Run 'grove langs' for the full list.");
        std::process::exit(1);
    })
}
