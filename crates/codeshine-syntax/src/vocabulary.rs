//! Class-name conventions for highlight captures.

/// How a capture name such as `keyword.control` turns into a class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassVocabulary {
    /// `token keyword control`
    Token,
    /// `hljs-keyword control_`; each deeper scope segment gets one more `_`.
    Hljs,
}

impl ClassVocabulary {
    pub fn class_name(self, capture: &str) -> String {
        let parts = capture.split('.').filter(|part| !part.is_empty());
        match self {
            ClassVocabulary::Token => std::iter::once("token")
                .chain(parts)
                .collect::<Vec<_>>()
                .join(" "),
            ClassVocabulary::Hljs => parts
                .enumerate()
                .map(|(depth, part)| {
                    if depth == 0 {
                        format!("hljs-{part}")
                    } else {
                        format!("{part}{}", "_".repeat(depth))
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
