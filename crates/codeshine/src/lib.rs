//! # codeshine
//!
//! Highlight source code into a `pre > code` element tree and render it as an
//! HTML or JSX string.
//!
//! Tokenization is delegated to an engine from `codeshine-syntax`. The
//! resulting tree can be regrouped into one `span` per line
//! ([`transform::wrap_lines`]) and have URLs turned into links
//! ([`transform::autolink`]) before it is serialized.
//!
//! ## Example
//!
//! ```rust
//! use codeshine::{to_html, Options};
//!
//! let html = to_html("a\nb", Options::new().wrap_lines(true));
//! assert_eq!(
//!     html,
//!     "<pre class=\"language-text prism\"><code class=\"language-text prism\">\
//!      <span>a</span><span>\nb</span></code></pre>"
//! );
//! ```
//!
//! Text content is not escaped; callers embedding the output in a page are
//! responsible for that.

pub mod config;
mod highlight;
mod options;
pub mod render;
pub mod transform;

pub use codeshine_syntax::{
    hljs, languages, prism, AttributeValue, Element, Engine, Language, Node, Primitive,
    RegisterError, Root,
};
pub use highlight::{highlight, highlight_with, stringify, stringify_with, to_html, to_jsx};
pub use options::{defaults, Defaults, EngineKind, Options, Settings, Toggle};
pub use render::Format;

/// The available engines.
pub fn engines() -> &'static [EngineKind] {
    &EngineKind::ALL
}

/// The adapter for `kind`.
pub fn engine(kind: EngineKind) -> &'static dyn Engine {
    kind.engine()
}
