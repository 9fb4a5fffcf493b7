//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::options::Settings;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default highlight settings
    pub highlight: Settings,
}
