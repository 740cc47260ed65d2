// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String-keyed parameter bag with dotted section addressing

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading parameters out of configuration sources
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("expected a JSON object at the top level, got {0}")]
    NotAnObject(String),
}

/// Ordered map of string keys to string values
///
/// Keys are case-sensitive. Nested sections are addressed with dot-separated
/// keys, so `connection.host` is the `host` key of the `connection` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag {
    values: BTreeMap<String, String>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from key/value pairs, later pairs overriding earlier ones
    pub fn from_tuples<K, V>(tuples: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        tuples.into_iter().collect()
    }

    /// Parse a TOML document, flattening nested tables into dotted keys
    pub fn from_toml_str(input: &str) -> Result<Self, ParamsError> {
        let table: toml::Table = toml::from_str(input)?;
        let mut bag = Self::new();
        for (key, value) in &table {
            flatten_toml(&mut bag, key, value);
        }
        Ok(bag)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self, ParamsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Flatten a JSON object into dotted keys
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ParamsError> {
        let serde_json::Value::Object(map) = value else {
            return Err(ParamsError::NotAnObject(value.to_string()));
        };
        let mut bag = Self::new();
        for (key, value) in map {
            flatten_json(&mut bag, key, value);
        }
        Ok(bag)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, or an empty string when it is missing
    pub fn get_as_string(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Non-empty value for `key`
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn get_as_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn get_as_integer_or(&self, key: &str, default: i64) -> i64 {
        self.get_as_integer(key).unwrap_or(default)
    }

    pub fn get_as_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        }
    }

    /// Set a value, returning the previous one
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// All keys under `name.`, with the prefix stripped
    pub fn get_section(&self, name: &str) -> ParameterBag {
        let prefix = format!("{}.", name);
        self.values
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }

    /// Distinct names of top-level sections (keys containing a dot)
    ///
    /// Numeric names, as produced by flattened arrays, come first in numeric
    /// order so `10` follows `9`; the rest follow in lexical order.
    pub fn section_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .values
            .keys()
            .filter_map(|key| key.split_once('.').map(|(section, _)| section))
            .filter(|section| !section.is_empty())
            .collect();
        let mut names: Vec<&str> = names.into_iter().collect();
        names.sort_by_key(|name| match name.parse::<u64>() {
            Ok(index) => (false, index, ""),
            Err(_) => (true, 0, *name),
        });
        names.into_iter().map(str::to_string).collect()
    }

    /// Copy every key of `section` into this bag under `name.`
    pub fn add_section(&mut self, name: &str, section: &ParameterBag) {
        for (key, value) in section.iter() {
            let full_key = if name.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", name, key)
            };
            self.values.insert(full_key, value.to_string());
        }
    }

    /// Merge `other` into this bag; values from `other` win
    pub fn override_with(&self, other: &ParameterBag) -> ParameterBag {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.put(key, value);
        }
        merged
    }

    /// Fill in missing keys from `defaults`; existing values win
    pub fn set_defaults(&self, defaults: &ParameterBag) -> ParameterBag {
        defaults.override_with(self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parses `key1=value1;key2=value2`
///
/// Delimiters inside values are not escaped: a value can never contain `;`,
/// and only the first `=` of a token separates key from value.
impl FromStr for ParameterBag {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut bag = Self::new();
        for token in line.split(';') {
            if token.trim().is_empty() {
                continue;
            }
            match token.split_once('=') {
                Some((key, value)) => bag.put(key.trim(), value.trim()),
                None => bag.put(token.trim(), ""),
            };
        }
        Ok(bag)
    }
}

impl fmt::Display for ParameterBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.values.iter().enumerate() {
            if index > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

fn flatten_toml(bag: &mut ParameterBag, key: &str, value: &toml::Value) {
    match value {
        toml::Value::Table(table) => {
            for (child, value) in table {
                flatten_toml(bag, &format!("{}.{}", key, child), value);
            }
        }
        toml::Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_toml(bag, &format!("{}.{}", key, index), value);
            }
        }
        toml::Value::String(s) => {
            bag.put(key, s.as_str());
        }
        other => {
            bag.put(key, other.to_string());
        }
    }
}

fn flatten_json(bag: &mut ParameterBag, key: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (child, value) in map {
                flatten_json(bag, &format!("{}.{}", key, child), value);
            }
        }
        serde_json::Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_json(bag, &format!("{}.{}", key, index), value);
            }
        }
        serde_json::Value::String(s) => {
            bag.put(key, s.as_str());
        }
        serde_json::Value::Null => {}
        other => {
            bag.put(key, other.to_string());
        }
    }
}

#[cfg(test)]
#[path = "bag_tests.rs"]
mod tests;
