//! Finalize
//!
//! Composes the generated triple into one component document and pretty-prints it.
//!
//! - **Script**: imports hoisted, deduplicated and merged per source module, the
//!   remaining statements kept in order
//! - **Markup**: reindented with the same lenient tag stack the assembler uses
//! - **Style**: one declaration per line
//!
//! Formatting an already formatted document returns it unchanged.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::generators::ParsedCode;
use crate::markup::{tag_tokens, TagToken};

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?s)<script([^>]*)>(.*?)</script>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?s)<style([^>]*)>(.*?)</style>").unwrap();
    static ref NAMED_IMPORT: Regex =
        Regex::new(r#"^import\s*\{([^}]*)\}\s*from\s*["']([^"']+)["']$"#).unwrap();
    static ref IMPORT_SOURCE: Regex = Regex::new(r#"["']([^"']+)["']$"#).unwrap();
}

const INDENT: &str = "\t";

/// `<script lang="ts">…</script> markup <style>…</style>`, unformatted.
pub fn compose_document(code: &ParsedCode) -> String {
    format!(
        "<script lang=\"ts\">{}</script> {} <style>{}</style>",
        code.script, code.markup, code.style
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPT
// ═══════════════════════════════════════════════════════════════════════════════

/// Split on top-level `;`. Separators inside string literals and brackets do not
/// end a statement.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for c in script.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                statements.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    statements.push(current);

    statements
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_import(statement: &str) -> bool {
    statement
        .strip_prefix("import")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '"' || c == '\''))
}

#[derive(Debug, Default)]
struct ImportGroup {
    named: Vec<String>,
    /// Default, namespace and side-effect imports, kept as written.
    verbatim: Vec<String>,
}

/// Imports merged per source module, in first-seen order of the sources.
fn merge_imports<'s>(imports: impl IntoIterator<Item = &'s str>) -> Vec<String> {
    let mut groups: IndexMap<String, ImportGroup> = IndexMap::new();

    for statement in imports {
        let normalized = statement.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(cap) = NAMED_IMPORT.captures(&normalized) {
            let group = groups.entry(cap[2].to_string()).or_default();
            for name in cap[1].split(',').map(str::trim).filter(|n| !n.is_empty()) {
                if !group.named.iter().any(|existing| existing == name) {
                    group.named.push(name.to_string());
                }
            }
            continue;
        }
        let source = IMPORT_SOURCE
            .captures(&normalized)
            .map(|cap| cap[1].to_string())
            .unwrap_or_else(|| normalized.clone());
        let group = groups.entry(source).or_default();
        if !group.verbatim.contains(&normalized) {
            group.verbatim.push(normalized);
        }
    }

    let mut lines = Vec::new();
    for (source, group) in groups {
        if !group.named.is_empty() {
            lines.push(format!(
                "import {{ {} }} from \"{}\";",
                group.named.join(", "),
                source
            ));
        }
        lines.extend(group.verbatim.into_iter().map(|s| format!("{};", s)));
    }
    lines
}

/// Script body: merged imports, a blank line, then every other statement in order.
pub fn format_script(script: &str) -> String {
    let statements = split_statements(script);
    let (imports, body): (Vec<&String>, Vec<&String>) =
        statements.iter().partition(|s| is_import(s));

    let imports = merge_imports(imports.into_iter().map(String::as_str));
    let body: Vec<String> = body.into_iter().map(|s| format!("{};", s)).collect();

    let indent_all = |lines: Vec<String>| {
        lines
            .into_iter()
            .map(|line| format!("{}{}", INDENT, line))
            .collect::<Vec<_>>()
            .join("\n")
    };
    [indent_all(imports), indent_all(body)]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ═══════════════════════════════════════════════════════════════════════════════
// MARKUP
// ═══════════════════════════════════════════════════════════════════════════════

fn split_before_tags(markup: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in markup.match_indices('<') {
        if index > start {
            pieces.push(&markup[start..index]);
        }
        start = index;
    }
    pieces.push(&markup[start..]);
    pieces
}

/// One tag (with the text that follows it) per line, indented by nesting depth.
/// An element closed right after its opening line stays on that line.
pub fn format_markup(markup: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    // Line of the innermost open tag, while nothing has been emitted after it.
    let mut just_opened: Option<usize> = None;

    for piece in split_before_tags(markup) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let token = if piece.starts_with('<') {
            tag_tokens(piece).next()
        } else {
            None
        };

        if let Some(TagToken::Close(name)) = token {
            if stack.last() == Some(&name) {
                stack.pop();
                if let Some(line) = just_opened.take() {
                    lines[line].push_str(piece);
                    continue;
                }
            }
        }
        just_opened = None;
        lines.push(format!("{}{}", INDENT.repeat(stack.len()), piece));
        if let Some(TagToken::Open(name)) = token {
            stack.push(name);
            just_opened = Some(lines.len() - 1);
        }
    }

    lines.join("\n")
}

// ═══════════════════════════════════════════════════════════════════════════════
// STYLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Every rule expanded to one declaration per line. Empty rules are dropped.
pub fn format_style(style: &str) -> String {
    style
        .split('}')
        .filter_map(|chunk| {
            let (selector, body) = chunk.split_once('{')?;
            let selector = selector.split_whitespace().collect::<Vec<_>>().join(" ");
            let declarations: Vec<String> = body
                .split(';')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| format!("{0}{0}{1};", INDENT, d))
                .collect();
            if selector.is_empty() || declarations.is_empty() {
                return None;
            }
            Some(format!(
                "{0}{1} {{\n{2}\n{0}}}",
                INDENT,
                selector,
                declarations.join("\n")
            ))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ═══════════════════════════════════════════════════════════════════════════════
// DOCUMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Pretty-print a component document: script, markup and style, separated by
/// blank lines. Empty sections are left out.
pub fn format_document(document: &str) -> String {
    let script = SCRIPT_BLOCK.captures(document).and_then(|cap| {
        let body = format_script(&cap[2]);
        (!body.is_empty()).then(|| format!("<script{}>\n{}\n</script>", &cap[1], body))
    });
    let style = STYLE_BLOCK.captures(document).and_then(|cap| {
        let body = format_style(&cap[2]);
        (!body.is_empty()).then(|| format!("<style{}>\n{}\n</style>", &cap[1], body))
    });

    let without_script = SCRIPT_BLOCK.replace(document, "");
    let markup_only = STYLE_BLOCK.replace(&without_script, "");
    let markup = format_markup(&markup_only);

    [script, Some(markup).filter(|m| !m.is_empty()), style]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE TRANSFORM
// ═══════════════════════════════════════════════════════════════════════════════

/// External post-processing of a finished document, e.g. a hosted code assistant.
pub trait RemoteTransform {
    /// Transformed document, or `None` when the service is unavailable or declines.
    fn transform(&self, credential: &str, document: &str) -> Option<String>;
}

/// Hand `document` to the remote transform when one is configured. Its result is
/// used as-is; without one, or when it declines, the local document is returned.
pub fn finish_with_remote(
    document: String,
    remote: Option<(&dyn RemoteTransform, &str)>,
) -> String {
    let Some((service, credential)) = remote else {
        return document;
    };
    match service.transform(credential, &document) {
        Some(transformed) => transformed,
        None => {
            tracing::debug!("remote transform returned nothing, keeping local output");
            document
        }
    }
}
