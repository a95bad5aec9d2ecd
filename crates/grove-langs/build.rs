use std::path::PathBuf;

use grove_codegen::{GenerateConfig, generate_from_json};

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_path = PathBuf::from(&manifest_dir).join("Cargo.toml");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Collect enabled lang-* features from environment
    let enabled_features: Vec<String> = std::env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(|suffix| format!("lang-{}", suffix.to_lowercase().replace('_', "-")))
        })
        .collect();

    if enabled_features.is_empty() {
        println!("cargo::rerun-if-changed=build.rs");
        println!("cargo::rerun-if-changed=Cargo.toml");
        return;
    }

    let metadata = cargo_metadata::MetadataCommand::new()
        .manifest_path(&manifest_path)
        .features(cargo_metadata::CargoOpt::SomeFeatures(enabled_features.clone()))
        .exec()
        .expect("failed to run cargo metadata");

    for package in &metadata.packages {
        let Some(feature_name) = arborium_package_to_feature(&package.name) else {
            continue;
        };
        if !enabled_features.contains(&feature_name) {
            continue;
        }

        let package_root = package
            .manifest_path
            .parent()
            .expect("package has no parent dir");

        let node_types_path = package_root.join("grammar/src/node-types.json");
        if !node_types_path.exists() {
            panic!(
                "node-types.json not found for {}: {}",
                package.name, node_types_path
            );
        }

        let lang = feature_to_module_name(&feature_name);
        let json = std::fs::read_to_string(&node_types_path)
            .unwrap_or_else(|e| panic!("failed to read {node_types_path}: {e}"));
        let config = GenerateConfig::default().with_module_name(&lang);
        let module = generate_from_json(&json, &config)
            .unwrap_or_else(|e| panic!("failed to generate node types for {lang}: {e}"));

        let out_path = out_dir.join(format!("{lang}.rs"));
        std::fs::write(&out_path, module.source)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", out_path.display()));

        let env_var_name = format!("GROVE_NODE_TYPES_{}", lang.to_uppercase());
        println!("cargo::rustc-env={}={}", env_var_name, node_types_path);
        println!("cargo::rerun-if-changed={}", node_types_path);
    }

    for (key, _) in std::env::vars() {
        if key.starts_with("CARGO_FEATURE_LANG_") {
            println!("cargo::rerun-if-env-changed={}", key);
        }
    }

    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=Cargo.toml");
}

/// `lang-foo-bar` -> `foo_bar`
fn feature_to_module_name(feature: &str) -> String {
    feature
        .strip_prefix("lang-")
        .unwrap_or(feature)
        .replace('-', "_")
}

fn arborium_package_to_feature(package_name: &str) -> Option<String> {
    const NON_LANGUAGE_PACKAGES: &[&str] = &[
        "arborium-highlight",
        "arborium-host",
        "arborium-plugin-runtime",
        "arborium-sysroot",
        "arborium-theme",
        "arborium-tree-sitter",
        "arborium-wire",
    ];

    if NON_LANGUAGE_PACKAGES.contains(&package_name) {
        return None;
    }

    package_name
        .strip_prefix("arborium-")
        .map(|suffix| format!("lang-{suffix}"))
}
