//! Key/value input store
//!
//! The input file is YAML. Each top-level key holds either a scalar or a
//! list of scalars; a scalar counts as a single entry. Lookups return the
//! textual form of the value and callers parse what they need.

use crate::error::{PhotoError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Shape of one top-level value in the YAML input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    List(Vec<RawScalar>),
    One(RawScalar),
    Empty(Option<()>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_yml::Number),
    Flag(bool),
}

/// One stored value. Strings keep their source text; numbers and booleans
/// are rebuilt by the YAML parser, so `20.50` comes back as `20.5`.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    text: String,
    verbatim: bool,
}

impl From<RawScalar> for Entry {
    fn from(raw: RawScalar) -> Self {
        match raw {
            RawScalar::Text(text) => Entry { text, verbatim: true },
            RawScalar::Number(n) => Entry {
                text: n.to_string(),
                verbatim: false,
            },
            RawScalar::Flag(b) => Entry {
                text: b.to_string(),
                verbatim: false,
            },
        }
    }
}

/// Parsed input file: every key maps to one or more textual entries.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    entries: HashMap<String, Vec<Entry>>,
}

impl InputData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PhotoError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, RawValue> = serde_yml::from_str(content).map_err(|e| {
            PhotoError::config(format!(
                "failed to parse input file (keys must hold scalars or lists of scalars): {e}"
            ))
        })?;

        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let values = match value {
                    RawValue::List(items) => items.into_iter().map(Entry::from).collect(),
                    RawValue::One(item) => vec![Entry::from(item)],
                    RawValue::Empty(_) => Vec::new(),
                };
                (key, values)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Build a store directly from key/value pairs; every value counts as
    /// written text.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, vs)| {
                let values = vs
                    .into_iter()
                    .map(|v| Entry {
                        text: v.into(),
                        verbatim: true,
                    })
                    .collect();
                (k.into(), values)
            })
            .collect();
        Self { entries }
    }

    /// First entry of `key`.
    pub fn first(&self, key: &str) -> Result<&str> {
        self.get(key, 0)
    }

    /// The `index`-th entry of `key`.
    pub fn get(&self, key: &str, index: usize) -> Result<&str> {
        self.entry(key, index).map(|e| e.text.as_str())
    }

    /// The `index`-th entry of `key` exactly as written in the input.
    ///
    /// File names and echoed labels go through here. An unquoted number or
    /// boolean has lost its source spelling and is rejected; quote it.
    pub fn verbatim(&self, key: &str, index: usize) -> Result<&str> {
        let entry = self.entry(key, index)?;
        if !entry.verbatim {
            return Err(PhotoError::config(format!(
                "{key}[{index}] must be a quoted string, found '{}'",
                entry.text
            )));
        }
        Ok(&entry.text)
    }

    /// First entry of `key` exactly as written.
    pub fn verbatim_first(&self, key: &str) -> Result<&str> {
        self.verbatim(key, 0)
    }

    /// Number of entries stored for `key`; zero when the key is absent.
    pub fn size(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, Vec::len)
    }

    /// First entry of `key` parsed as `T`.
    pub fn parse_first<T>(&self, key: &str) -> Result<T>
    where
        T: std::str::FromStr,
    {
        self.parse_at(key, 0)
    }

    /// The `index`-th entry of `key` parsed as `T`.
    pub fn parse_at<T>(&self, key: &str, index: usize) -> Result<T>
    where
        T: std::str::FromStr,
    {
        let text = self.get(key, index)?;
        text.trim().parse::<T>().map_err(|_| {
            PhotoError::config(format!("cannot parse {key}[{index}] from '{text}'"))
        })
    }

    fn entry(&self, key: &str, index: usize) -> Result<&Entry> {
        let values = self
            .entries
            .get(key)
            .ok_or_else(|| PhotoError::config(format!("missing key {key}")))?;
        values.get(index).ok_or_else(|| {
            PhotoError::config(format!(
                "key {key} has {} entries, entry {index} requested",
                values.len()
            ))
        })
    }
}
