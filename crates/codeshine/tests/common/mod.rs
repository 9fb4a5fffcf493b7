//! Shared helpers for codeshine integration tests.

/// Remove every tag from rendered HTML, keeping text content.
///
/// Source text is not escaped by the serializer, so a `<` only opens a tag
/// when it is followed by `/` or an ASCII letter. A `<` followed by anything
/// else is text, e.g. the operator in `i < 5`.
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    let mut chars = markup.chars().peekable();
    while let Some(c) = chars.next() {
        if in_tag {
            in_tag = c != '>';
            continue;
        }
        let opens_tag =
            c == '<' && chars.peek().is_some_and(|next| *next == '/' || next.is_ascii_alphabetic());
        if opens_tag {
            in_tag = true;
        } else {
            out.push(c);
        }
    }
    out
}
