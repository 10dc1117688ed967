//! Deterministic names for emitted classes, state variables and option values.

use sha2::{Digest, Sha256};

/// Characters of the layer name that make it into a class name.
const CLASS_NAME_PREFIX_LEN: usize = 8;

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Layer names keep only `[a-zA-Z0-9_-]`.
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| is_class_char(*c)).collect()
}

/// Node ids use the `[0-9I:;]` alphabet; `:` and `;` are mapped instead of dropped so
/// `1:23` and `12:3` stay distinct.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter_map(|c| match c {
            ':' => Some('-'),
            ';' => Some('_'),
            c if is_class_char(c) => Some(c),
            _ => None,
        })
        .collect()
}

/// Unique CSS class for a node: up to 8 sanitized name characters, a dash and the
/// sanitized id. Prefixed with `_` when it would not start like an identifier.
pub fn unique_class_name(name: &str, id: &str) -> String {
    let head: String = name.chars().take(CLASS_NAME_PREFIX_LEN).collect();
    let class = format!("{}-{}", sanitize_name(&head), sanitize_id(id));
    match class.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => class,
        _ => format!("_{}", class),
    }
}

/// Script identifier for a widget's bound state, stable per node id.
pub fn state_identifier(prefix: &str, node_id: &str) -> String {
    let digest = Sha256::digest(node_id.as_bytes());
    let hex = format!("{:x}", digest);
    format!("{}_{}", prefix, &hex[..10])
}

/// `"Hello World"` → `"helloWorld"`.
pub fn create_slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
