//! Mapper configuration
//!
//! Controls how destination identifiers are split into source member segments and
//! whether registrations flatten by default.

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::constants::SNAKE_CASE_SEPARATOR;
use crate::error::{Error, Result};

/// Naming convention shared by source and destination member names
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
pub enum NamingConvention {
    /// `son_grandson_my_int`: segments split on `_`
    #[default]
    #[serde(rename = "snake_case")]
    #[strum(serialize = "snake_case")]
    SnakeCase,
    /// `SonGrandsonMyInt`: segments are raw name prefixes
    #[serde(rename = "PascalCase")]
    #[strum(serialize = "PascalCase")]
    PascalCase,
}

impl NamingConvention {
    /// Separator consumed after a matched segment, if the convention has one
    pub const fn separator(self) -> Option<char> {
        match self {
            Self::SnakeCase => Some(SNAKE_CASE_SEPARATOR),
            Self::PascalCase => None,
        }
    }
}

/// Settings applied to every registration compiled by a [`crate::Mapper`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Convention used to split destination names into source segments
    pub naming:             NamingConvention,
    /// Whether registrations that never choose explicitly flatten their source
    pub flatten_by_default: bool,
}

impl MapperConfig {
    /// Parse a configuration from JSON text; missing keys take their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Report::new(Error::InvalidConfig(e.to_string())))
            .attach("expected keys: naming, flatten_by_default")
    }

    /// Replace the naming convention
    #[must_use]
    pub const fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Replace the flatten default
    #[must_use]
    pub const fn with_flatten_by_default(mut self, flatten: bool) -> Self {
        self.flatten_by_default = flatten;
        self
    }
}
