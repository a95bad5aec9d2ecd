use grove_langs::Lang;

pub fn run() {
    print!("{}", format_langs(&grove_langs::all()));
}

/// One line per language: name, then extensions.
pub fn format_langs(langs: &[Lang]) -> String {
    let mut out = format!("Supported languages ({}):\n", langs.len());
    for lang in langs {
        let exts: Vec<String> = lang.extensions().iter().map(|e| format!(".{e}")).collect();
        out.push_str(&format!("  {:<12} {}\n", lang.name(), exts.join(" ")));
    }
    out
}
