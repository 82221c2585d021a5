//! Package option handling
//!
//! Recipes expose two boolean options, `shared` and `fPIC`, with defaults
//! {shared: false, fPIC: true}. A recipe may override the defaults; an
//! invocation may override either with `-o name=value`.

use serde::{Deserialize, Serialize};

use crate::error::OptionError;

/// Names accepted in `-o key=value` overrides
pub const OPTION_NAMES: &[&str] = &["shared", "fPIC"];

/// Default values a recipe may override in its `[options]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionDefaults {
    /// Build a shared library instead of a static one
    #[serde(default)]
    pub shared: Option<bool>,

    /// Emit position-independent code
    #[serde(default, rename = "fPIC")]
    pub fpic: Option<bool>,
}

/// Resolved option values for one invocation
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Options {
    /// Build a shared library instead of a static one
    pub shared: bool,

    /// Emit position-independent code
    #[serde(rename = "fPIC")]
    pub fpic: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: true,
        }
    }
}

impl Options {
    /// Resolve option values from a recipe's declared defaults
    pub fn from_defaults(defaults: &OptionDefaults) -> Self {
        let base = Self::default();
        Self {
            shared: defaults.shared.unwrap_or(base.shared),
            fpic: defaults.fpic.unwrap_or(base.fpic),
        }
    }

    /// Apply a `-o key=value` override
    pub fn apply_override(&mut self, input: &str) -> Result<(), OptionError> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| OptionError::InvalidOverride {
                input: input.to_string(),
            })?;

        let parsed = parse_bool(key, value)?;
        match key {
            "shared" => self.shared = parsed,
            "fPIC" => self.fpic = parsed,
            _ => {
                return Err(OptionError::Unknown {
                    name: key.to_string(),
                    known: OPTION_NAMES.to_vec(),
                })
            }
        }
        Ok(())
    }

    /// Apply a list of overrides in order
    pub fn apply_overrides(&mut self, inputs: &[String]) -> Result<(), OptionError> {
        for input in inputs {
            self.apply_override(input)?;
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, OptionError> {
    match value {
        "true" | "True" => Ok(true),
        "false" | "False" => Ok(false),
        _ => Err(OptionError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
