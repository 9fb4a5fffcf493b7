//! Serializers from the element tree to markup strings.

pub mod html;
pub mod jsx;

use std::fmt;
use std::str::FromStr;

use codeshine_syntax::Node;
use serde::{Deserialize, Serialize};

/// Output format of [`stringify`](crate::stringify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Jsx,
}

impl Format {
    pub fn render(self, node: &Node) -> String {
        match self {
            Format::Html => html::render(node),
            Format::Jsx => jsx::render(node),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Html => f.write_str("html"),
            Format::Jsx => f.write_str("jsx"),
        }
    }
}

/// Unknown output format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format `{0}` (expected `html` or `jsx`)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Format::Html),
            "jsx" => Ok(Format::Jsx),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}
