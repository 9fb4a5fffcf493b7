//! The highlight pipeline: tokenize, wrap in `pre > code`, transform, render.

use codeshine_syntax::tree::join_classes;
use codeshine_syntax::{Element, Node, Root};

use crate::options::{defaults, Options, Settings};
use crate::render::Format;
use crate::transform::{autolink, wrap_lines};

/// Language id used when the requested language is not registered.
const FALLBACK_LANGUAGE: &str = "text";

/// Highlight `text` with the shared defaults overridden by `options`.
///
/// Returns `None` for empty text. `options` may be a bare language name.
///
/// ```rust
/// let root = codeshine::highlight("SELECT 1;", "sql").unwrap();
/// assert_eq!(root.text_content(), "SELECT 1;");
/// assert!(codeshine::highlight("", "sql").is_none());
/// ```
pub fn highlight(text: &str, options: impl Into<Options>) -> Option<Root> {
    let settings = defaults().resolve(options.into());
    highlight_with(text, &settings)
}

/// Highlight `text` with fully resolved settings, ignoring the shared defaults.
pub fn highlight_with(text: &str, settings: &Settings) -> Option<Root> {
    if text.is_empty() {
        return None;
    }

    let engine = settings.engine.engine();
    let (language, mut content) = match engine.tokenize_registered(text, &settings.language) {
        Some(root) => (settings.language.as_str(), root.children),
        None => {
            log::debug!(
                "{}: `{}` is not registered, highlighting as text",
                engine.name(),
                settings.language
            );
            (FALLBACK_LANGUAGE, Root::text(text).children)
        }
    };

    // Autolink runs on the wrapped lines so links land inside line spans.
    if settings.wrap_lines.is_enabled() {
        content = wrap_lines(content, settings.wrap_lines.class());
    }
    if settings.autolink.is_enabled() {
        content = autolink(content, settings.autolink.class());
    }

    let language_class = format!("language-{language}");
    let shell_class = |extra: &str| {
        join_classes([language_class.as_str(), engine.name(), extra]).unwrap_or_default()
    };

    let code = Element::new("code")
        .with_class(&shell_class(&settings.code_class))
        .with_children(content);
    let pre = Element::new("pre")
        .with_class(&shell_class(&settings.pre_class))
        .with_children(vec![Node::Element(code)]);

    Some(Root::new(vec![Node::Element(pre)]))
}

/// Highlight `text` and render its `pre` element in `format`.
///
/// Returns an empty string for empty text.
pub fn stringify(text: &str, format: Format, options: impl Into<Options>) -> String {
    let settings = defaults().resolve(options.into());
    stringify_with(text, format, &settings)
}

/// [`stringify`] with fully resolved settings.
pub fn stringify_with(text: &str, format: Format, settings: &Settings) -> String {
    highlight_with(text, settings)
        .and_then(|root| root.children.first().map(|pre| format.render(pre)))
        .unwrap_or_default()
}

/// Highlight `text` as an HTML string.
pub fn to_html(text: &str, options: impl Into<Options>) -> String {
    stringify(text, Format::Html, options)
}

/// Highlight `text` as a JSX source string.
pub fn to_jsx(text: &str, options: impl Into<Options>) -> String {
    stringify(text, Format::Jsx, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{EngineKind, Toggle};

    fn settings(language: &str) -> Settings {
        Settings {
            language: language.to_string(),
            ..Settings::default()
        }
    }

    fn code(root: &Root) -> &Element {
        let pre = root.children[0].as_element().unwrap();
        pre.children[0].as_element().unwrap()
    }

    #[test]
    fn test_empty_text() {
        assert!(highlight_with("", &settings("html")).is_none());
        assert_eq!(stringify_with("", Format::Html, &settings("html")), "");
        assert_eq!(stringify_with("", Format::Jsx, &settings("html")), "");
    }

    #[test]
    fn test_pre_code_shell() {
        let root = highlight_with("<h1>hello world</h1>", &settings("html")).unwrap();
        assert_eq!(root.children.len(), 1);
        let pre = root.children[0].as_element().unwrap();
        assert_eq!(pre.tag_name, "pre");
        assert_eq!(pre.children.len(), 1);
        assert_eq!(code(&root).tag_name, "code");
        assert_eq!(pre.class_name().as_deref(), Some("language-html prism"));
        assert_eq!(code(&root).class_name().as_deref(), Some("language-html prism"));
    }

    #[test]
    fn test_unregistered_language_falls_back_to_text() {
        let root = highlight_with("<p>x</p>", &settings("nope")).unwrap();
        let code = code(&root);
        assert_eq!(code.children, vec![Node::text("<p>x</p>")]);
        assert_eq!(code.class_name().as_deref(), Some("language-text prism"));
    }

    #[test]
    fn test_language_class_follows_tokenization() {
        let root = highlight_with("let x = 42;", &settings("js")).unwrap();
        let code = code(&root);
        assert_eq!(code.class_name().as_deref(), Some("language-js prism"));
        assert!(code.children.iter().any(|n| !n.is_text()));

        let root = highlight_with("let x = 42;", &settings("typescript")).unwrap();
        let code = self::code(&root);
        assert_eq!(code.class_name().as_deref(), Some("language-text prism"));
        assert!(code.children.iter().all(Node::is_text));
    }

    #[test]
    fn test_extra_classes() {
        let settings = Settings {
            engine: EngineKind::Hljs,
            pre_class: "foo min-[200px]:bar  hljs".to_string(),
            code_class: " foo-123 bar_45 ".to_string(),
            ..settings("html")
        };
        let root = highlight_with("<div></div>", &settings).unwrap();
        let pre = root.children[0].as_element().unwrap();
        assert_eq!(
            pre.class_name().as_deref(),
            Some("language-html hljs foo min-[200px]:bar")
        );
        assert_eq!(
            code(&root).class_name().as_deref(),
            Some("language-html hljs foo-123 bar_45")
        );
    }

    #[test]
    fn test_wrap_then_autolink() {
        let settings = Settings {
            wrap_lines: Toggle::from("line"),
            autolink: Toggle::from("link"),
            ..settings("text")
        };
        let html = stringify_with("see https://x.io\nbye", Format::Html, &settings);
        assert_eq!(
            html,
            "<pre class=\"language-text prism\"><code class=\"language-text prism\">\
             <span class=\"line\">see <a href=\"https://x.io\" class=\"link\">https://x.io</a></span>\
             <span class=\"line\">\nbye</span></code></pre>"
        );
    }

    #[test]
    fn test_jsx_output_for_plain_text() {
        let settings = Settings {
            wrap_lines: Toggle::On,
            ..settings("text")
        };
        let jsx = stringify_with("a\n\\b", Format::Jsx, &settings);
        assert_eq!(
            jsx,
            "<pre className=\"language-text prism\"><code className=\"language-text prism\">\
             <span>{`a`}</span><span>{`\n\\\\b`}</span></code></pre>"
        );
    }

    #[test]
    fn test_idempotent() {
        let settings = Settings {
            language: "javascript".to_string(),
            wrap_lines: Toggle::On,
            autolink: Toggle::On,
            ..Settings::default()
        };
        let text = "// http://example.com\nlet x = 42;";
        assert_eq!(highlight_with(text, &settings), highlight_with(text, &settings));
    }
}
