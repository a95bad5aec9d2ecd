use crate::Lang;

macro_rules! define_langs {
    (
        $(
            $mod_name:ident => {
                feature: $feature:literal,
                name: $name:literal,
                ts_lang: $ts_lang:expr,
                node_types_env: $node_types_env:literal,
                names: [$($alias:literal),* $(,)?],
                extensions: [$($ext:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub mod $mod_name {
                /// Node types generated from the grammar's `node-types.json`.
                #[allow(clippy::all, dead_code)]
                pub mod nodes {
                    include!(concat!(env!("OUT_DIR"), "/", $name, ".rs"));
                }

                pub fn lang() -> $crate::Lang {
                    $crate::Lang {
                        name: $name,
                        aliases: &[$($alias),*],
                        extensions: &[$($ext),*],
                        language: || $ts_lang.into(),
                        node_types_json: include_str!(env!($node_types_env)),
                        module: nodes::MODULE,
                    }
                }
            }
        )*

        pub fn from_name(s: &str) -> Option<Lang> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($mod_name::lang()),
                )*
                _ => None,
            }
        }

        pub fn from_ext(ext: &str) -> Option<Lang> {
            match ext.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($ext)|* => Some($mod_name::lang()),
                )*
                _ => None,
            }
        }

        pub fn all() -> Vec<Lang> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $mod_name::lang(),
                )*
            ]
        }
    };
}

define_langs! {
    javascript => {
        feature: "lang-javascript",
        name: "javascript",
        ts_lang: arborium_javascript::language(),
        node_types_env: "GROVE_NODE_TYPES_JAVASCRIPT",
        names: ["javascript", "js", "jsx", "ecmascript", "es"],
        extensions: ["js", "mjs", "cjs", "jsx"],
    },
    json => {
        feature: "lang-json",
        name: "json",
        ts_lang: arborium_json::language(),
        node_types_env: "GROVE_NODE_TYPES_JSON",
        names: ["json"],
        extensions: ["json"],
    },
    python => {
        feature: "lang-python",
        name: "python",
        ts_lang: arborium_python::language(),
        node_types_env: "GROVE_NODE_TYPES_PYTHON",
        names: ["python", "py"],
        extensions: ["py", "pyi", "pyw"],
    },
    rust => {
        feature: "lang-rust",
        name: "rust",
        ts_lang: arborium_rust::language(),
        node_types_env: "GROVE_NODE_TYPES_RUST",
        names: ["rust", "rs"],
        extensions: ["rs"],
    },
}
