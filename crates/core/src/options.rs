//! Driver options handling
//!
//! Bridges receive their configuration as a generic string-to-string
//! mapping extracted from the host's storage configuration. This module
//! validates the container shape once; per-key validation belongs to the
//! adapter that consumes the option.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Validated string-to-string option mapping for one storage backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<String, String>,
}

impl Options {
    /// Build options from an already-typed map
    pub fn from_map(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Extract options from a deserialized configuration value
    ///
    /// Fails with a configuration error if the value is absent, null, or
    /// not an object whose values are all strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Object(map) => map,
            Value::Null => {
                return Err(Error::Config("options are missing".into()));
            }
            other => {
                return Err(Error::Config(format!(
                    "options must be a string-to-string mapping, got {other}"
                )));
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in object {
            let Value::String(value) = value else {
                return Err(Error::Config(format!(
                    "option '{key}' must be a string"
                )));
            };
            entries.insert(key.clone(), value.clone());
        }

        Ok(Self { entries })
    }

    /// Look up an optional option
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a required option, naming the missing key on failure
    pub fn require(&self, key: &'static str) -> Result<&str> {
        self.get(key).ok_or(Error::MissingOption(key))
    }

    /// Return the first present option among several accepted spellings
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Parse an optional integer option, falling back to a default
    pub fn parse_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| {
                Error::Config(format!("option '{key}' must be an integer, got '{raw}'"))
            }),
        }
    }
}
