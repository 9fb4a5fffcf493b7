//! Regroup a tree into one `span` per source line.
//!
//! Every `\n` in any text leaf is a line boundary, however deeply nested.
//! Elements whose text crosses a boundary are duplicated, one copy per line,
//! so highlighting carries over to the continuation lines. The newline itself
//! starts the fragment that follows it.

use codeshine_syntax::{Element, Node};

/// A node tagged with the zero-based line it belongs to.
type Piece = (usize, Node);

/// Wrap `nodes` into line spans.
///
/// Produces exactly `1 + count('\n')` spans. Lines without content hold a
/// single empty text leaf. `class` is set on every span when given.
pub fn wrap_lines(nodes: Vec<Node>, class: Option<&str>) -> Vec<Node> {
    let mut line = 0;
    let mut pieces: Vec<Piece> = Vec::new();
    for node in nodes {
        split_node(node, &mut line, &mut pieces);
    }

    let mut lines: Vec<Vec<Node>> = vec![Vec::new(); line + 1];
    for (index, node) in pieces {
        append(&mut lines[index], node);
    }

    lines
        .into_iter()
        .map(|mut children| {
            if children.is_empty() {
                children.push(Node::text(""));
            }
            let mut span = Element::new("span").with_children(children);
            if let Some(class) = class {
                span.set_class(class);
            }
            Node::Element(span)
        })
        .collect()
}

fn split_node(node: Node, line: &mut usize, out: &mut Vec<Piece>) {
    match node {
        Node::Text(value) => split_text(&value, line, out),
        Node::Element(element) if element.children.is_empty() => {
            out.push((*line, Node::Element(element)));
        }
        Node::Element(mut element) => {
            let mut inner: Vec<Piece> = Vec::new();
            for child in std::mem::take(&mut element.children) {
                split_node(child, line, &mut inner);
            }

            // One copy of the element per run of same-line pieces.
            let mut runs: Vec<(usize, Vec<Node>)> = Vec::new();
            for (index, piece) in inner {
                match runs.last_mut() {
                    Some((last, children)) if *last == index => append(children, piece),
                    _ => runs.push((index, vec![piece])),
                }
            }
            for (index, children) in runs {
                out.push((index, Node::Element(element.shallow_clone(children))));
            }
        }
    }
}

fn split_text(value: &str, line: &mut usize, out: &mut Vec<Piece>) {
    let mut segments = value.split('\n');
    if let Some(first) = segments.next() {
        // A leaf that starts with a newline contributes nothing to the
        // current line.
        if !first.is_empty() || !value.contains('\n') {
            out.push((*line, Node::text(first)));
        }
    }
    for segment in segments {
        *line += 1;
        out.push((*line, Node::text(format!("\n{segment}"))));
    }
}

/// Push `node`, coalescing it into a preceding text leaf.
fn append(children: &mut Vec<Node>, node: Node) {
    match (children.last_mut(), node) {
        (Some(Node::Text(last)), Node::Text(value)) => last.push_str(&value),
        (_, node) => children.push(node),
    }
}
