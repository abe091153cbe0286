//! Regex rule lists for remove and preserve patterns
//!
//! A [`PatternSet`] is an ordered list of compiled regular expressions. A path
//! matches the set when any pattern finds a match anywhere in the relative
//! path string; authors anchor with `^` and `$` when they need to. An empty
//! set matches nothing, so an unset remove list never deletes anything and an
//! unset preserve list never protects anything.

use crate::error::{Error, Result};
use regex::Regex;

/// A compiled, ordered list of path patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    regexes: Vec<Regex>,
}

impl PatternSet {
    /// Compile every pattern, failing on the first invalid one.
    ///
    /// No partially compiled set is ever returned.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let regexes = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| Error::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { regexes })
    }

    /// Returns true if any pattern matches `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regexes.iter().any(|re| re.is_match(path))
    }

    /// Keep the paths matched by at least one pattern, in their original order.
    pub fn filter<'a, I>(&self, paths: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.regexes.is_empty() {
            return Vec::new();
        }
        paths.into_iter().filter(|p| self.is_match(p)).collect()
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }
}
