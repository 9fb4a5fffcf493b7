//! JSX serializer.
//!
//! Text leaves become template-literal expressions (`` {`…`} ``) so
//! whitespace, newlines and braces survive JSX parsing unchanged.

use codeshine_syntax::tree::{AttributeValue, Primitive};
use codeshine_syntax::{Element, Node};

/// Render a node and its descendants as JSX source.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(value) => {
            out.push_str("{`");
            out.push_str(&escape_template(value));
            out.push_str("`}");
        }
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push('=');
        out.push_str(&prop_value(value));
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

/// Keep the template literal closed: backslashes first, then the delimiters.
fn escape_template(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn prop_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(value) => format!("\"{value}\""),
        AttributeValue::List(values) => format!("\"{}\"", values.join(" ")),
        AttributeValue::Record(record) if record.is_empty() => "{{}}".to_string(),
        AttributeValue::Record(record) => {
            let members = record
                .iter()
                .map(|(key, value)| format!("{key}: {}", literal(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{{ {members} }}}}")
        }
    }
}

fn literal(value: &Primitive) -> String {
    match value {
        Primitive::String(value) => format!("\"{value}\""),
        Primitive::Number(value) => value.to_string(),
        Primitive::Bool(value) => value.to_string(),
        Primitive::Null => "null".to_string(),
    }
}
