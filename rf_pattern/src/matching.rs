/**
 * Thin adapter onto the host regex engine.
 *
 * The engine has no lookaround, back-references, conditionals or inline
 * comments; patterns using those render fine but fail to compile here.
 */

use std::ops::Range;
use regex::Regex;
use crate::pattern::Pattern;

impl Pattern {
    /// Compiles the rendered source with the host engine.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        let regex = Regex::new(self.as_str());
        if let Err(err) = &regex {
            tracing::debug!(pattern = %self, %err, "host engine rejected pattern");
        }
        regex
    }

    /// Checks if the pattern matches anywhere in the haystack.
    pub fn is_match(&self, haystack: &str) -> Result<bool, regex::Error> {
        Ok(self.compile()?.is_match(haystack))
    }

    /// Byte range of the leftmost match.
    pub fn search(&self, haystack: &str) -> Result<Option<Range<usize>>, regex::Error> {
        Ok(self.compile()?.find(haystack).map(|m| m.range()))
    }

    /// All non-overlapping matches, left to right.
    pub fn find_all<'t>(&self, haystack: &'t str) -> Result<Vec<&'t str>, regex::Error> {
        Ok(self.compile()?.find_iter(haystack).map(|m| m.as_str()).collect())
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
