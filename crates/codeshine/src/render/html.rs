//! HTML serializer.
//!
//! Text is written verbatim; escaping source text is the caller's concern.
//! Attribute values are always double-quoted with `"` escaped so the markup
//! stays well-formed whatever the class strings contain.

use codeshine_syntax::tree::{AttributeValue, Primitive, CLASS_NAME};
use codeshine_syntax::{Element, Node};

/// Render a node and its descendants as HTML.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(value) => out.push_str(value),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(attribute_name(key));
        out.push_str("=\"");
        out.push_str(&attribute_value(value).replace('"', "&quot;"));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag_name);
    out.push('>');
}

fn attribute_name(key: &str) -> &str {
    if key == CLASS_NAME {
        "class"
    } else {
        key
    }
}

fn attribute_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(value) => value.clone(),
        AttributeValue::List(values) => values.join(" "),
        // Records become CSS-style declarations, e.g. `style="color: red; order: 2"`.
        AttributeValue::Record(record) => record
            .iter()
            .map(|(key, value)| format!("{key}: {}", primitive(value)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

fn primitive(value: &Primitive) -> String {
    match value {
        Primitive::String(value) => value.clone(),
        Primitive::Number(value) => value.to_string(),
        Primitive::Bool(value) => value.to_string(),
        Primitive::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_text_is_not_escaped() {
        assert_eq!(render(&Node::text("a < b && c")), "a < b && c");
    }

    #[test]
    fn test_class_name_renders_as_class() {
        let el = Element::new("span")
            .with_class("token keyword")
            .with_children(vec![Node::text("let")]);
        assert_eq!(render(&el.into()), r#"<span class="token keyword">let</span>"#);
    }

    #[test]
    fn test_childless_element_self_closes() {
        let el = Element::new("span").with_class("hljs-params");
        assert_eq!(render(&el.into()), r#"<span class="hljs-params" />"#);
        assert_eq!(render(&Element::new("br").into()), "<br />");
    }

    #[test]
    fn test_element_without_attributes() {
        let el = Element::new("span").with_children(vec![Node::text("\n")]);
        assert_eq!(render(&el.into()), "<span>\n</span>");
    }

    #[test]
    fn test_list_and_record_attributes() {
        let mut style = IndexMap::new();
        style.insert("color".to_string(), Primitive::from("red"));
        style.insert("order".to_string(), Primitive::from(2));
        let el = Element::new("a")
            .with_attribute("href", "https://x.io/?a=1&b=2")
            .with_attribute("rel", vec!["noopener".to_string(), "nofollow".to_string()])
            .with_attribute("style", style)
            .with_children(vec![Node::text("x")]);
        assert_eq!(
            render(&el.into()),
            r#"<a href="https://x.io/?a=1&b=2" rel="noopener nofollow" style="color: red; order: 2">x</a>"#
        );
    }

    #[test]
    fn test_quotes_in_attributes_stay_well_formed() {
        let el = Element::new("span")
            .with_attribute("title", r#"say "hi""#)
            .with_children(vec![Node::text("x")]);
        assert_eq!(render(&el.into()), r#"<span title="say &quot;hi&quot;">x</span>"#);
    }

    #[test]
    fn test_nested_rendering() {
        let tree = Element::new("pre")
            .with_class("language-text prism")
            .with_children(vec![Element::new("code")
                .with_class("language-text prism")
                .with_children(vec![Node::text("a\nb")])
                .into()]);
        assert_eq!(
            render(&tree.into()),
            "<pre class=\"language-text prism\"><code class=\"language-text prism\">a\nb</code></pre>"
        );
    }
}
