//! Replace URLs found in text leaves with `a` elements.

use std::sync::LazyLock;

use codeshine_syntax::{Element, Node};
use regex::Regex;

/// `http://`, `https://`, `mailto://` or `tel:` followed by a run of URL
/// characters. Whitespace, quotes and angle brackets end a URL.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:https?://|mailto://|tel:)[^\s<>"'`]+"#)
        .expect("autolink regex is a compile-time constant and must be valid")
});

/// Link every URL in every text leaf under `nodes`.
///
/// Each leaf is scanned on its own, so a URL split across two leaves is not
/// linked. Existing elements keep their tag and attributes; only their text
/// descendants are rewritten.
pub fn autolink(nodes: Vec<Node>, class: Option<&str>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(value) => link_text(value, class, &mut out),
            Node::Element(mut element) => {
                element.children = autolink(std::mem::take(&mut element.children), class);
                out.push(Node::Element(element));
            }
        }
    }
    out
}

fn link_text(value: String, class: Option<&str>, out: &mut Vec<Node>) {
    let mut last = 0;
    let mut linked = false;
    for found in URL_PATTERN.find_iter(&value) {
        if found.start() > last {
            out.push(Node::text(&value[last..found.start()]));
        }
        out.push(Node::Element(link(found.as_str(), class)));
        last = found.end();
        linked = true;
    }

    if !linked {
        out.push(Node::Text(value));
    } else if last < value.len() {
        out.push(Node::text(&value[last..]));
    }
}

fn link(url: &str, class: Option<&str>) -> Element {
    let mut anchor = Element::new("a")
        .with_attribute("href", url)
        .with_children(vec![Node::text(url)]);
    if let Some(class) = class {
        anchor.set_class(class);
    }
    anchor
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshine_syntax::tree::{Root, CLASS_NAME};
    use rstest::rstest;

    fn links(nodes: &[Node]) -> Vec<String> {
        let mut found = Vec::new();
        for node in nodes {
            node.walk(&mut |n: &Node| {
                if let Some(el) = n.as_element().filter(|el| el.tag_name == "a") {
                    found.push(el.text_content());
                }
            });
        }
        found
    }

    #[rstest]
    #[case("https://google.com")]
    #[case("http://foo.bar")]
    #[case("https://foo.bar?a=1&b=2#my-hash")]
    #[case("mailto://foo@gmail.com")]
    #[case("tel:+87348734")]
    fn test_whole_leaf_is_linked(#[case] url: &str) {
        let out = autolink(vec![Node::text(url)], None);
        assert_eq!(out.len(), 1);
        let anchor = out[0].as_element().unwrap();
        assert_eq!(anchor.tag_name, "a");
        assert_eq!(anchor.attributes.get("href").and_then(|v| v.joined()).as_deref(), Some(url));
        assert_eq!(anchor.children, vec![Node::text(url)]);
        assert!(anchor.attributes.get(CLASS_NAME).is_none());
    }

    #[rstest]
    #[case("./foo/bar.js")]
    #[case("/usr/share/doc")]
    #[case("ftp://example.com")]
    #[case("see example.com")]
    fn test_non_urls_are_untouched(#[case] text: &str) {
        let out = autolink(vec![Node::text(text)], None);
        assert_eq!(out, vec![Node::text(text)]);
    }

    #[test]
    fn test_leading_and_trailing_text() {
        let out = autolink(vec![Node::text("see https://x.io/p?q=1#f now")], None);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Node::text("see "));
        assert_eq!(out[1].as_element().unwrap().tag_name, "a");
        assert_eq!(out[1].text_content(), "https://x.io/p?q=1#f");
        assert_eq!(out[2], Node::text(" now"));
    }

    #[test]
    fn test_every_url_is_linked() {
        let out = autolink(
            vec![Node::text("https://foo.bar tel:837474\n        mailto://ddd@ijij.com")],
            None,
        );
        assert_eq!(links(&out), vec!["https://foo.bar", "tel:837474", "mailto://ddd@ijij.com"]);
        assert_eq!(
            Root::new(out).text_content(),
            "https://foo.bar tel:837474\n        mailto://ddd@ijij.com"
        );
    }

    #[test]
    fn test_links_inside_nested_elements() {
        let comment = Element::new("span")
            .with_class("token comment")
            .with_children(vec![Node::text("// http://example.com/foo")]);
        let line = Element::new("span").with_children(vec![Node::Element(comment)]);
        let out = autolink(vec![Node::Element(line)], Some("text-red-500 no-underline"));

        let line = out[0].as_element().unwrap();
        assert!(line.attributes.is_empty());
        let comment = line.children[0].as_element().unwrap();
        assert_eq!(comment.class_name().as_deref(), Some("token comment"));
        assert_eq!(comment.children[0], Node::text("// "));
        let anchor = comment.children[1].as_element().unwrap();
        assert_eq!(anchor.class_name().as_deref(), Some("text-red-500 no-underline"));
        let keys: Vec<&str> = anchor.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["href", CLASS_NAME]);
    }

    #[test]
    fn test_url_split_across_leaves_is_not_linked() {
        let out = autolink(vec![Node::text("htt"), Node::text("p://x.io")], None);
        assert!(links(&out).is_empty());
    }

    #[test]
    fn test_quotes_end_a_url() {
        let out = autolink(vec![Node::text("\"https://x.io/a\";")], None);
        assert_eq!(links(&out), vec!["https://x.io/a"]);
        assert_eq!(out.last(), Some(&Node::text("\";")));
    }
}
