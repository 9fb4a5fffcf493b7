//! Per-call options, resolved settings and the shared defaults.

use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

pub use codeshine_syntax::EngineKind;

/// An on/off switch that may also carry a class list.
///
/// `false` disables the transform, `true` (or an empty string) enables it
/// without a class, and any other string enables it and adds the string as
/// the class of every element the transform creates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawToggle", into = "RawToggle")]
pub enum Toggle {
    #[default]
    Off,
    On,
    Class(String),
}

impl Toggle {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Toggle::Off)
    }

    /// Class for created elements, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Toggle::Class(class) if !class.trim().is_empty() => Some(class),
            _ => None,
        }
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Toggle::On
        } else {
            Toggle::Off
        }
    }
}

impl From<&str> for Toggle {
    fn from(class: &str) -> Self {
        Toggle::from(class.to_string())
    }
}

impl From<String> for Toggle {
    fn from(class: String) -> Self {
        if class.trim().is_empty() {
            Toggle::On
        } else {
            Toggle::Class(class)
        }
    }
}

/// Wire form of [`Toggle`]: a boolean or a class string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawToggle {
    Bool(bool),
    Class(String),
}

impl From<RawToggle> for Toggle {
    fn from(raw: RawToggle) -> Self {
        match raw {
            RawToggle::Bool(enabled) => Toggle::from(enabled),
            RawToggle::Class(class) => Toggle::from(class),
        }
    }
}

impl From<Toggle> for RawToggle {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::Off => RawToggle::Bool(false),
            Toggle::On => RawToggle::Bool(true),
            Toggle::Class(class) => RawToggle::Class(class),
        }
    }
}

/// Fully resolved highlight settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Language id passed to the engine
    pub language: String,
    /// Engine used for tokenization
    pub engine: EngineKind,
    /// Wrap every source line in a `span`
    pub wrap_lines: Toggle,
    /// Turn URLs in text into links
    pub autolink: Toggle,
    /// Extra classes for the `pre` element
    pub pre_class: String,
    /// Extra classes for the `code` element
    pub code_class: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "text".to_string(),
            engine: EngineKind::Prism,
            wrap_lines: Toggle::Off,
            autolink: Toggle::Off,
            pre_class: String::new(),
            code_class: String::new(),
        }
    }
}

impl Settings {
    /// These settings with every option that is set taking precedence.
    pub fn merged(&self, options: Options) -> Settings {
        Settings {
            language: options.language.unwrap_or_else(|| self.language.clone()),
            engine: options.engine.unwrap_or(self.engine),
            wrap_lines: options.wrap_lines.unwrap_or_else(|| self.wrap_lines.clone()),
            autolink: options.autolink.unwrap_or_else(|| self.autolink.clone()),
            pre_class: options.pre_class.unwrap_or_else(|| self.pre_class.clone()),
            code_class: options.code_class.unwrap_or_else(|| self.code_class.clone()),
        }
    }
}

/// Per-call overrides; unset fields fall back to the defaults.
///
/// A bare language name converts into options selecting that language:
///
/// ```rust
/// use codeshine::Options;
///
/// let options: Options = "html".into();
/// assert_eq!(options.language.as_deref(), Some("html"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub language: Option<String>,
    pub engine: Option<EngineKind>,
    pub wrap_lines: Option<Toggle>,
    pub autolink: Option<Toggle>,
    pub pre_class: Option<String>,
    pub code_class: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn wrap_lines(mut self, wrap_lines: impl Into<Toggle>) -> Self {
        self.wrap_lines = Some(wrap_lines.into());
        self
    }

    pub fn autolink(mut self, autolink: impl Into<Toggle>) -> Self {
        self.autolink = Some(autolink.into());
        self
    }

    pub fn pre_class(mut self, class: impl Into<String>) -> Self {
        self.pre_class = Some(class.into());
        self
    }

    pub fn code_class(mut self, class: impl Into<String>) -> Self {
        self.code_class = Some(class.into());
        self
    }
}

impl From<&str> for Options {
    fn from(language: &str) -> Self {
        Options::new().language(language)
    }
}

impl From<String> for Options {
    fn from(language: String) -> Self {
        Options::new().language(language)
    }
}

/// Mutable default settings shared by every entry point.
///
/// Writes from concurrent callers race; the last write wins. Callers that need
/// isolation pass explicit options or use the `*_with` entry points.
#[derive(Debug, Default)]
pub struct Defaults {
    settings: RwLock<Settings>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current defaults.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Change individual values in place.
    ///
    /// ```rust
    /// use codeshine::Defaults;
    ///
    /// let defaults = Defaults::new();
    /// defaults.update(|d| d.language = "html".to_string());
    /// assert_eq!(defaults.get().language, "html");
    /// ```
    pub fn update(&self, change: impl FnOnce(&mut Settings)) {
        let mut settings = self.settings.write();
        change(&mut *settings);
    }

    /// Replace every value, e.g. with settings loaded from a config file.
    pub fn load(&self, settings: Settings) {
        log::debug!("loading default settings: {:?}", settings);
        *self.settings.write() = settings;
    }

    /// Restore the built-in defaults.
    pub fn reset(&self) {
        log::debug!("resetting default settings");
        *self.settings.write() = Settings::default();
    }

    /// The current defaults with `options` applied on top.
    pub fn resolve(&self, options: Options) -> Settings {
        self.settings.read().merged(options)
    }
}

static DEFAULTS: LazyLock<Defaults> = LazyLock::new(Defaults::new);

/// The process-wide defaults used by [`highlight`](crate::highlight) and the
/// format wrappers.
pub fn defaults() -> &'static Defaults {
    &DEFAULTS
}
