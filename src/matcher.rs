use crate::dictionary::Dictionary;
use crate::errors::Result;
use regex::{Regex, RegexSet};

/// Detects which dictionary words occur in a line of text.
///
/// A `WordMatcher` compiles the trigger words into a case-insensitive
/// `RegexSet` for cheap multi-word gating, plus one finder `Regex` per word
/// for locating the actual match spans during replacement. Words are escaped,
/// so matching is literal substring matching: "master" matches inside
/// "mastermind". That mirrors the dictionary's literal semantics; whole-word
/// boundaries are deliberately not applied.
pub struct WordMatcher {
    gate: RegexSet,
    finders: Vec<Regex>,
}

impl WordMatcher {
    /// Compiles a matcher for every entry of the dictionary.
    pub fn new(dictionary: &Dictionary) -> Result<Self> {
        let patterns: Vec<String> = dictionary
            .entries()
            .iter()
            .map(|e| format!("(?i){}", regex::escape(&e.word_lower)))
            .collect();

        let finders = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            gate: RegexSet::new(&patterns)?,
            finders,
        })
    }

    /// Returns the dictionary indices of the words present in `line`, in
    /// dictionary order.
    pub fn detect(&self, line: &str) -> Vec<usize> {
        self.gate.matches(line).into_iter().collect()
    }

    /// `true` if any dictionary word occurs in `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.gate.is_match(line)
    }

    /// The case-insensitive finder regex for the word at `idx`.
    pub fn finder(&self, idx: usize) -> &Regex {
        &self.finders[idx]
    }
}
