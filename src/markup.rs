//! Lenient tag scanning over generated markup.
//!
//! Generators emit a container's opening tag without its closer; the closer is
//! recovered afterwards by scanning the markup with HTML-like leniency: closers that
//! do not match the innermost open tag are ignored, void and self-closing tags never
//! open a scope.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<(/?)([A-Za-z][\w-]*)([^>]*)>").unwrap();
}

/// Block element closed when the scan finds nothing left open.
pub const DEFAULT_CONTAINER_TAG: &str = "div";

const VOID_TAGS: &[&str] = &["input", "img", "br", "hr", "meta", "link"];

pub fn is_void_tag(name: &str) -> bool {
    VOID_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToken<'a> {
    Open(&'a str),
    Close(&'a str),
    /// `<x/>` or a void element.
    Standalone(&'a str),
}

/// Tag tokens of `markup` in document order.
pub fn tag_tokens(markup: &str) -> impl Iterator<Item = TagToken<'_>> {
    TAG_RE.captures_iter(markup).filter_map(|cap| {
        let name = cap.get(2)?.as_str();
        let is_close = !cap[1].is_empty();
        let self_closing = cap[3].trim_end().ends_with('/');
        Some(if is_close {
            TagToken::Close(name)
        } else if self_closing || is_void_tag(name) {
            TagToken::Standalone(name)
        } else {
            TagToken::Open(name)
        })
    })
}

/// Tags still open after a lenient scan, outermost first.
pub fn open_tags(markup: &str) -> Vec<&str> {
    let mut stack: Vec<&str> = Vec::new();
    for token in tag_tokens(markup) {
        match token {
            TagToken::Open(name) => stack.push(name),
            TagToken::Close(name) => {
                if stack.last() == Some(&name) {
                    stack.pop();
                }
            }
            TagToken::Standalone(_) => {}
        }
    }
    stack
}

/// Closer for the outermost tag left open in `markup`, `</div>` if none is.
pub fn closing_tag(markup: &str) -> String {
    let tag = open_tags(markup)
        .first()
        .copied()
        .unwrap_or(DEFAULT_CONTAINER_TAG);
    format!("</{}>", tag)
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "&#123;").replace('}', "&#125;")
}

/// Text content safe to place between tags of a component template.
pub fn escape_text(text: &str) -> String {
    escape_braces(&htmlize::escape_text(text))
}

/// Text safe inside a double-quoted attribute of a component template.
pub fn escape_attribute(text: &str) -> String {
    escape_braces(&htmlize::escape_attribute(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let tokens: Vec<_> = tag_tokens(r#"<div class="a"><input value="x"><Icon /></div>"#).collect();
        assert_eq!(
            tokens,
            vec![
                TagToken::Open("div"),
                TagToken::Standalone("input"),
                TagToken::Standalone("Icon"),
                TagToken::Close("div"),
            ]
        );
    }

    #[test]
    fn test_closes_outer_container_around_balanced_content() {
        let mut inner = String::from("<p class=\"t\">leaf</p>");
        for depth in 0..12 {
            inner = format!("<section data-depth=\"{}\">{}<div></div></section>", depth, inner);
        }
        let markup = format!("<RadioGroup class=\"g\" inline>{}", inner);
        assert_eq!(closing_tag(&markup), "</RadioGroup>");

        let closed = format!("{}{}", markup, closing_tag(&markup));
        assert!(open_tags(&closed).is_empty());
    }

    #[test]
    fn test_mismatched_closers_are_ignored() {
        assert_eq!(open_tags("<div><span></p>"), vec!["div", "span"]);
        assert_eq!(open_tags("<div><span></div>"), vec!["div", "span"]);
        assert_eq!(closing_tag("<div class=\"x\"><span></div>"), "</div>");
    }

    #[test]
    fn test_empty_stack_defaults_to_div() {
        assert_eq!(closing_tag(""), "</div>");
        assert_eq!(closing_tag("<p>done</p>"), "</div>");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b & {c}"), "a &lt; b &amp; &#123;c&#125;");
        assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
    }
}
