//! Structure-only rewrites of a highlighted tree.
//!
//! Transforms never add, drop or reorder characters; they only change which
//! node owns which text and insert wrapper elements.

mod autolink;
mod wrap_lines;

pub use autolink::autolink;
pub use wrap_lines::wrap_lines;
