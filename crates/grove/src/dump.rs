//! Indented text rendering of node trees.

use crate::node::Node;

/// What `dump` includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Include anonymous nodes.
    pub anonymous: bool,
    /// Append `[row:col-row:col]` to each node.
    pub spans: bool,
    /// Show the raw grammar type next to the kind.
    pub grammar_types: bool,
    /// Stop descending below this depth.
    pub max_depth: Option<usize>,
}

/// Render `node` as an S-expression-like tree, one node per line.
pub fn dump(node: &Node, options: &DumpOptions) -> String {
    let mut out = String::new();
    write_tree(&mut out, node, options);
    out.push('\n');
    out
}

enum Step<'a> {
    Open(&'a Node, usize),
    Close,
}

fn write_tree(out: &mut String, root: &Node, options: &DumpOptions) {
    let mut steps = vec![Step::Open(root, 0)];
    while let Some(step) = steps.pop() {
        let (node, depth) = match step {
            Step::Open(node, depth) => (node, depth),
            Step::Close => {
                out.push(')');
                continue;
            }
        };
        if depth > 0 {
            out.push('\n');
        }

        let indent = "  ".repeat(depth);
        let field_prefix = node
            .field_name()
            .map(|f| format!("{f}: "))
            .unwrap_or_default();
        let kind = if options.grammar_types {
            format!("{} <{}>", node.kind().identifier(), node.grammar_type())
        } else {
            node.kind().identifier().to_string()
        };
        let span_suffix = if options.spans {
            format!(" [{}-{}]", node.start_point(), node.end_point())
        } else {
            String::new()
        };

        let children: Vec<&Node> = node
            .children()
            .iter()
            .filter(|c| options.anonymous || c.is_named())
            .collect();
        let truncated = options.max_depth.is_some_and(|max| depth >= max);

        if children.is_empty() || truncated {
            let ellipsis = if truncated && !children.is_empty() {
                " ..."
            } else {
                ""
            };
            if children.is_empty() && node.child_count() == 0 {
                out.push_str(&format!(
                    "{indent}{field_prefix}({kind} \"{}\"){span_suffix}",
                    escape(&node.text())
                ));
            } else {
                out.push_str(&format!("{indent}{field_prefix}({kind}{ellipsis}){span_suffix}"));
            }
            continue;
        }

        out.push_str(&format!("{indent}{field_prefix}({kind}{span_suffix}"));
        steps.push(Step::Close);
        steps.extend(children.into_iter().rev().map(|c| Step::Open(c, depth + 1)));
    }
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c if c.is_control() => result.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
