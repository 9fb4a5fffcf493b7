//! Engine adapters: tree-sitter highlighting folded into the element tree.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter as TsHighlighter};

use crate::languages::{self, Language};
use crate::tree::{push_text, Element, Node, Root};
use crate::vocabulary::ClassVocabulary;

/// Error registering a language.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// The definition does not have the shape the engine requires.
    #[error("invalid language definition `{name}`: {reason}")]
    InvalidLanguageDefinition { name: String, reason: String },
}

/// Unknown engine identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine `{0}` (expected `prism` or `hljs`)")]
pub struct UnknownEngine(pub String);

/// Capability contract every tokenizer backend satisfies.
///
/// Implementations are shared process-wide, so every method takes `&self`;
/// the method table is fixed once the adapter exists.
pub trait Engine: Send + Sync {
    /// Identifier added to the `pre`/`code` class list.
    fn name(&self) -> &'static str;

    /// Tokenize `text` as `language`.
    ///
    /// Unregistered languages yield a root holding `text` as a single text
    /// leaf. Empty text yields an empty root.
    fn tokenize(&self, text: &str, language: &str) -> Root {
        if text.is_empty() {
            return Root::default();
        }
        self.tokenize_registered(text, language).unwrap_or_else(|| {
            log::debug!("{}: language `{}` is not registered, emitting raw text", self.name(), language);
            Root::text(text)
        })
    }

    /// Tokenize `text` as `language`, or `None` when `language` is not
    /// registered. Lookup and tokenization see the same registry state.
    fn tokenize_registered(&self, text: &str, language: &str) -> Option<Root>;

    /// Register `language`. How `name` and `aliases` are interpreted depends on
    /// the engine's registration convention. On error nothing is registered.
    fn register_language(
        &self,
        language: Language,
        name: Option<&str>,
        aliases: &[&str],
    ) -> Result<(), RegisterError>;

    fn is_registered(&self, name: &str) -> bool;

    /// Registered names, in registration order.
    fn list_languages(&self) -> Vec<String>;
}

/// Selects one of the built-in engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Prism,
    Hljs,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::Prism, EngineKind::Hljs];

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Prism => "prism",
            EngineKind::Hljs => "hljs",
        }
    }

    /// The process-wide adapter for this kind.
    pub fn engine(self) -> &'static dyn Engine {
        match self {
            EngineKind::Prism => prism(),
            EngineKind::Hljs => hljs(),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prism" => Ok(EngineKind::Prism),
            "hljs" => Ok(EngineKind::Hljs),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

/// Standard capture names used by tree-sitter highlight queries.
const CAPTURE_NAMES: &[&str] = &[
    "attribute",
    "boolean",
    "comment",
    "comment.documentation",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.call",
    "function.macro",
    "function.method",
    "keyword",
    "keyword.control",
    "keyword.control.conditional",
    "keyword.control.import",
    "keyword.control.repeat",
    "keyword.control.return",
    "keyword.directive",
    "keyword.function",
    "keyword.operator",
    "keyword.special",
    "keyword.storage",
    "keyword.storage.modifier",
    "keyword.storage.type",
    "label",
    "namespace",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "special",
    "string",
    "string.escape",
    "string.regexp",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Which names a registration call installs a language under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The definition's own name and aliases, plus `name` and `aliases` as
    /// additional aliases.
    DefinitionName,
    /// `name` (or the definition's name when absent), then `aliases`, then the
    /// definition's aliases.
    ExplicitName,
}

impl Registration {
    fn names_for(self, language: &Language, name: Option<&str>, aliases: &[&str]) -> Vec<String> {
        let ordered: Vec<&str> = match self {
            Registration::DefinitionName => std::iter::once(language.name)
                .chain(language.aliases.iter().copied())
                .chain(name)
                .chain(aliases.iter().copied())
                .collect(),
            Registration::ExplicitName => std::iter::once(name.unwrap_or(language.name))
                .chain(aliases.iter().copied())
                .chain(language.aliases.iter().copied())
                .collect(),
        };

        let mut names: Vec<String> = Vec::with_capacity(ordered.len());
        for candidate in ordered {
            if !names.iter().any(|n| n == candidate) {
                names.push(candidate.to_string());
            }
        }
        names
    }
}

/// Registered languages, keyed by every name they answer to.
#[derive(Default)]
struct Registry {
    configs: HashMap<String, Arc<HighlightConfiguration>>,
    order: Vec<String>,
}

impl Registry {
    fn insert(&mut self, name: String, config: Arc<HighlightConfiguration>) {
        if self.configs.insert(name.clone(), config).is_none() {
            self.order.push(name);
        }
    }
}

/// An engine adapter driving tree-sitter-highlight.
pub struct TreeSitterEngine {
    name: &'static str,
    vocabulary: ClassVocabulary,
    registration: Registration,
    languages: RwLock<Registry>,
}

impl TreeSitterEngine {
    /// Create an engine with no languages registered.
    pub fn new(name: &'static str, vocabulary: ClassVocabulary, registration: Registration) -> Self {
        Self {
            name,
            vocabulary,
            registration,
            languages: RwLock::new(Registry::default()),
        }
    }

    /// Create an engine with the built-in languages registered.
    pub fn with_builtin_languages(
        name: &'static str,
        vocabulary: ClassVocabulary,
        registration: Registration,
    ) -> Self {
        let engine = Self::new(name, vocabulary, registration);
        for language in languages::builtin() {
            let language_name = language.name;
            if let Err(err) = engine.register_language(language, None, &[]) {
                log::warn!("{}: built-in language `{}` rejected: {}", name, language_name, err);
            }
        }
        engine
    }

    fn config(&self, language: &str) -> Option<Arc<HighlightConfiguration>> {
        self.languages.read().configs.get(language).cloned()
    }
}

impl Engine for TreeSitterEngine {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tokenize_registered(&self, text: &str, language: &str) -> Option<Root> {
        let config = self.config(language)?;
        if text.is_empty() {
            return Some(Root::default());
        }

        let root = match build_tree(&config, text, self.vocabulary) {
            Ok(children) => Root::new(children),
            Err(err) => {
                log::warn!("{}: highlighting `{}` failed, emitting raw text: {}", self.name, language, err);
                Root::text(text)
            }
        };
        Some(root)
    }

    fn register_language(
        &self,
        language: Language,
        name: Option<&str>,
        aliases: &[&str],
    ) -> Result<(), RegisterError> {
        let names = self.registration.names_for(&language, name, aliases);
        let primary = names.first().cloned().unwrap_or_default();
        let invalid = |reason: String| RegisterError::InvalidLanguageDefinition {
            name: primary.clone(),
            reason,
        };

        if let Some(bad) = names.iter().find(|n| n.trim().is_empty() || n.contains(char::is_whitespace)) {
            return Err(invalid(format!("`{bad}` is not a usable language name")));
        }
        if language.highlights_query.trim().is_empty() {
            return Err(invalid("highlights query is empty".to_string()));
        }

        let mut config = HighlightConfiguration::new(
            language.ts_language,
            language.name,
            language.highlights_query,
            language.injections_query,
            language.locals_query,
        )
        .map_err(|e| invalid(e.to_string()))?;

        // Configure the capture names
        config.configure(CAPTURE_NAMES);
        let config = Arc::new(config);

        let mut registry = self.languages.write();
        for n in &names {
            registry.insert(n.clone(), Arc::clone(&config));
        }
        log::debug!("{}: registered language `{}` as {:?}", self.name, primary, names);

        Ok(())
    }

    fn is_registered(&self, name: &str) -> bool {
        self.languages.read().configs.contains_key(name)
    }

    fn list_languages(&self) -> Vec<String> {
        self.languages.read().order.clone()
    }
}

/// Incrementally assembled element tree.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root,
        }
    }

    fn text(&mut self, value: &str) {
        push_text(self.children(), value);
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    fn close(&mut self) {
        if let Some(element) = self.open.pop() {
            self.children().push(Node::Element(element));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }
}

/// Fold the highlight event stream for `source` into nested `span` elements.
fn build_tree(
    config: &HighlightConfiguration,
    source: &str,
    vocabulary: ClassVocabulary,
) -> Result<Vec<Node>, tree_sitter_highlight::Error> {
    let mut highlighter = TsHighlighter::new();
    let highlights = highlighter.highlight(config, source.as_bytes(), None, |_| None)?;

    let mut builder = TreeBuilder::default();
    // Bytes of `source` emitted so far; gaps are emitted as plain text.
    let mut cursor = 0;

    for event in highlights {
        match event? {
            HighlightEvent::Source { start, end } => {
                if start > cursor {
                    builder.text(&source[cursor..start]);
                }
                if end > start.max(cursor) {
                    builder.text(&source[start.max(cursor)..end]);
                    cursor = end;
                }
            }
            HighlightEvent::HighlightStart(highlight) => {
                let capture = CAPTURE_NAMES.get(highlight.0).copied().unwrap_or("text");
                builder.open(Element::new("span").with_class(&vocabulary.class_name(capture)));
            }
            HighlightEvent::HighlightEnd => builder.close(),
        }
    }

    if cursor < source.len() {
        builder.text(&source[cursor..]);
    }

    Ok(builder.finish())
}

static PRISM: LazyLock<TreeSitterEngine> = LazyLock::new(|| {
    TreeSitterEngine::with_builtin_languages("prism", ClassVocabulary::Token, Registration::DefinitionName)
});

static HLJS: LazyLock<TreeSitterEngine> = LazyLock::new(|| {
    TreeSitterEngine::with_builtin_languages("hljs", ClassVocabulary::Hljs, Registration::ExplicitName)
});

/// The `prism` adapter: `token …` classes, languages registered by their own name.
pub fn prism() -> &'static TreeSitterEngine {
    &PRISM
}

/// The `hljs` adapter: `hljs-…` classes, languages registered by explicit name.
pub fn hljs() -> &'static TreeSitterEngine {
    &HLJS
}
