use crate::errors::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A single dictionary entry: a trigger word and its candidate replacements.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The trigger word as written in the dictionary document.
    pub word: String,
    /// Lowercased form of the word, used for case-insensitive detection.
    pub word_lower: String,
    /// The ordered, non-empty list of candidate replacement strings.
    pub candidates: Vec<String>,
}

/// The word -> candidates mapping driving every scan and replacement.
///
/// Built once per invocation from a JSON (or YAML) document and read-only
/// afterwards, which is what makes parallel scanning safe with no locking.
/// Entry order is the document's key insertion order and defines the
/// "dictionary order" used by detection, replacement, and both reports.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<Entry>,
}

impl Dictionary {
    /// Loads a dictionary from a file.
    ///
    /// The document's top level must be a mapping from trigger word to a
    /// non-empty list of replacement strings. Files ending in `.yaml`/`.yml`
    /// are parsed as YAML; everything else is parsed as JSON. Any shape
    /// violation fails with `InvalidDictionary` before a single input file
    /// is touched.
    pub fn load(path: &Path) -> Result<Dictionary> {
        let raw = fs::read_to_string(path)?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        // serde_json::Map is built with `preserve_order`, so key order here
        // is the document's insertion order.
        let map: serde_json::Map<String, Value> = if is_yaml {
            serde_yaml::from_str(&raw)
                .map_err(|e| Error::InvalidDictionary(e.to_string()))?
        } else {
            serde_json::from_str(&raw)
                .map_err(|e| Error::InvalidDictionary(e.to_string()))?
        };

        Self::from_map(map)
    }

    fn from_map(map: serde_json::Map<String, Value>) -> Result<Dictionary> {
        let mut entries = Vec::with_capacity(map.len());

        for (word, value) in map {
            let candidates = match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(Error::InvalidDictionary(format!(
                            "candidate for '{word}' is not a string: {other}"
                        ))),
                    })
                    .collect::<Result<Vec<String>>>()?,
                other => {
                    return Err(Error::InvalidDictionary(format!(
                        "entry '{word}' is not a list of strings: {other}"
                    )));
                }
            };

            if candidates.is_empty() {
                return Err(Error::InvalidDictionary(format!(
                    "entry '{word}' has no replacement candidates"
                )));
            }

            entries.push(Entry {
                word_lower: word.to_lowercase(),
                word,
                candidates,
            });
        }

        Ok(Dictionary { entries })
    }

    /// Builds a dictionary directly from `(word, candidates)` pairs.
    ///
    /// Applies the same validation as `load`; mostly useful for library
    /// callers and tests.
    pub fn from_entries<W, C>(pairs: Vec<(W, Vec<C>)>) -> Result<Dictionary>
    where
        W: Into<String>,
        C: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(word, candidates)| {
                (
                    word.into(),
                    Value::Array(
                        candidates
                            .into_iter()
                            .map(|c| Value::String(c.into()))
                            .collect(),
                    ),
                )
            })
            .collect();
        Self::from_map(map)
    }

    /// The entries in dictionary order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Looks up an entry by position in dictionary order.
    pub fn entry(&self, idx: usize) -> &Entry {
        &self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
