//! Language definitions the engines can register.
//!
//! A definition bundles a tree-sitter grammar with its queries, a display name
//! and the aliases it answers to when registered under that name. The five
//! built-in definitions are registered on both engines at construction.

use tree_sitter::Language as TsLanguage;

/// A language definition for syntax highlighting.
#[derive(Clone)]
pub struct Language {
    /// Display name (e.g., "sql", "javascript")
    pub name: &'static str,
    /// Extra names the definition answers to (e.g., "js")
    pub aliases: &'static [&'static str],
    pub ts_language: TsLanguage,
    /// Highlight queries (tree-sitter query syntax)
    pub highlights_query: &'static str,
    /// Injection queries; embedded languages are never resolved, so these only
    /// need to parse.
    pub injections_query: &'static str,
    pub locals_query: &'static str,
}

impl Language {
    /// A definition with only a highlight query.
    pub fn new(name: &'static str, ts_language: TsLanguage, highlights_query: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            ts_language,
            highlights_query,
            injections_query: "",
            locals_query: "",
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_injections(mut self, query: &'static str) -> Self {
        self.injections_query = query;
        self
    }

    pub fn with_locals(mut self, query: &'static str) -> Self {
        self.locals_query = query;
        self
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

pub fn html() -> Language {
    Language::new(
        "html",
        tree_sitter_html::LANGUAGE.into(),
        tree_sitter_html::HIGHLIGHTS_QUERY,
    )
    .with_injections(tree_sitter_html::INJECTIONS_QUERY)
}

pub fn css() -> Language {
    Language::new("css", tree_sitter_css::LANGUAGE.into(), tree_sitter_css::HIGHLIGHTS_QUERY)
}

/// JavaScript, also known as `js`.
pub fn javascript() -> Language {
    Language::new(
        "javascript",
        tree_sitter_javascript::LANGUAGE.into(),
        tree_sitter_javascript::HIGHLIGHT_QUERY,
    )
    .with_aliases(&["js"])
    .with_injections(tree_sitter_javascript::INJECTIONS_QUERY)
    .with_locals(tree_sitter_javascript::LOCALS_QUERY)
}

pub fn json() -> Language {
    Language::new("json", tree_sitter_json::LANGUAGE.into(), tree_sitter_json::HIGHLIGHTS_QUERY)
}

/// SQL via tree-sitter-sequel, which follows PostgreSQL syntax.
pub fn sql() -> Language {
    Language::new("sql", tree_sitter_sequel::LANGUAGE.into(), tree_sitter_sequel::HIGHLIGHTS_QUERY)
}

/// Every language the engines register at construction.
pub fn builtin() -> Vec<Language> {
    vec![html(), css(), javascript(), json(), sql()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<&str> = builtin()
            .iter()
            .flat_map(|l| std::iter::once(l.name).chain(l.aliases.iter().copied()))
            .collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_builtin_queries_are_present() {
        for language in builtin() {
            assert!(!language.highlights_query.trim().is_empty(), "{}", language.name);
        }
    }

    #[test]
    fn test_javascript_alias() {
        let js = javascript();
        assert_eq!(js.name, "javascript");
        assert_eq!(js.aliases, &["js"]);
        assert!(!js.locals_query.is_empty());
    }

    #[test]
    fn test_builder() {
        let language = json().with_aliases(&["jsonc"]).with_locals("");
        assert_eq!(language.aliases, &["jsonc"]);
        assert!(language.injections_query.is_empty());
        assert!(format!("{language:?}").contains("jsonc"));
    }
}
