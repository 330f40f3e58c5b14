/**
 * The named special classes, like `\d` or `.`, and their codepoint tables.
 *
 * The tables are the host engine's Unicode-mode classes restricted to the
 * 0..=255 range, so a canonical rendering means the same thing to the
 * engine as it does to the algebra.
 */

use rf_intervals::Interval;
use crate::CodepointSet;
use crate::pattern::Pattern;
use crate::universe::Universe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    Any,
    Whitespace,
    NotWhitespace,
    Word,
    NotWord,
    Digit,
    NotDigit,
    AnchorStart,
    AnchorEnd,
}

const DIGIT_TABLE: &[(u32, u32)] = &[(0x30, 0x39)];

const WHITESPACE_TABLE: &[(u32, u32)] = &[(0x09, 0x0D), (0x20, 0x20), (0x85, 0x85), (0xA0, 0xA0)];

const WORD_TABLE: &[(u32, u32)] = &[
    (0x30, 0x39), (0x41, 0x5A), (0x5F, 0x5F), (0x61, 0x7A),
    (0xAA, 0xAA), (0xB5, 0xB5), (0xBA, 0xBA),
    (0xC0, 0xD6), (0xD8, 0xF6), (0xF8, 0xFF),
];

impl Special {
    /// Classes tried when a whole codepoint set is recognized, shortest
    /// token first.
    pub(crate) const RECOGNIZED: [Special; 7] = [
        Special::Digit, Special::Word, Special::Whitespace,
        Special::NotDigit, Special::NotWord, Special::NotWhitespace,
        Special::Any,
    ];

    /// Classes that may stand for a part of a larger set.
    pub(crate) const EMBEDDABLE: [Special; 3] = [Special::Word, Special::Whitespace, Special::Digit];

    /// The standalone regex token.
    pub fn token(&self) -> &'static str {
        match self {
            Special::Any => "(?s:.)",
            Special::Whitespace => r"\s",
            Special::NotWhitespace => r"\S",
            Special::Word => r"\w",
            Special::NotWord => r"\W",
            Special::Digit => r"\d",
            Special::NotDigit => r"\D",
            Special::AnchorStart => "^",
            Special::AnchorEnd => "$",
        }
    }

    /// The token as written inside a bracketed class, `None` for anchors.
    pub(crate) fn class_item(&self) -> Option<&'static str> {
        match self {
            Special::Any => Some(r"\s\S"),
            Special::AnchorStart | Special::AnchorEnd => None,
            other => Some(other.token()),
        }
    }

    /// Anchors are zero-width, they match a position and no codepoint.
    pub fn is_anchor(&self) -> bool {
        matches!(self, Special::AnchorStart | Special::AnchorEnd)
    }

    /// The codepoints the class matches inside the universe.
    pub fn codepoints(&self, universe: &Universe) -> CodepointSet {
        let full = universe.full();
        match self {
            Special::Any => full,
            Special::Digit => table(DIGIT_TABLE).intersection(&full),
            Special::Word => table(WORD_TABLE).intersection(&full),
            Special::Whitespace => table(WHITESPACE_TABLE).intersection(&full),
            Special::NotDigit => full.difference(&table(DIGIT_TABLE)),
            Special::NotWord => full.difference(&table(WORD_TABLE)),
            Special::NotWhitespace => full.difference(&table(WHITESPACE_TABLE)),
            Special::AnchorStart | Special::AnchorEnd => CodepointSet::new(),
        }
    }
}

fn table(runs: &[(u32, u32)]) -> CodepointSet {
    runs.iter().filter_map(|&(lower, upper)| Interval::new(lower, upper)).collect()
}

/**
 * Shorthand constructors.
 */

/// `(?s:.)`, any character.
pub fn any() -> Pattern { Pattern::special(Special::Any) }
/// `\s`
pub fn whitespace() -> Pattern { Pattern::special(Special::Whitespace) }
/// `\S`
pub fn not_whitespace() -> Pattern { Pattern::special(Special::NotWhitespace) }
/// `\w`
pub fn word() -> Pattern { Pattern::special(Special::Word) }
/// `\W`
pub fn not_word() -> Pattern { Pattern::special(Special::NotWord) }
/// `\d`
pub fn digit() -> Pattern { Pattern::special(Special::Digit) }
/// `\D`
pub fn not_digit() -> Pattern { Pattern::special(Special::NotDigit) }
/// `^`
pub fn anchor_start() -> Pattern { Pattern::special(Special::AnchorStart) }
/// `$`
pub fn anchor_end() -> Pattern { Pattern::special(Special::AnchorEnd) }

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod special_tests {
    use super::*;
    use regex::Regex;

    fn matched_by_engine(token: &str) -> Vec<u32> {
        let rx = Regex::new(&format!("^{}$", token)).unwrap();
        (0u32..=255)
            .filter(|&cp| rx.is_match(&char::from_u32(cp).unwrap().to_string()))
            .collect()
    }

    #[test]
    fn tables_agree_with_engine() {
        let universe = Universe::ascii();
        for special in Special::RECOGNIZED.iter() {
            let ours: Vec<u32> = special.codepoints(&universe).points().collect();
            assert_eq!(ours, matched_by_engine(special.token()), "{:?}", special);
        }
    }

    #[test]
    fn class_items_agree_with_tokens() {
        for special in Special::RECOGNIZED.iter() {
            let item = special.class_item().unwrap();
            assert_eq!(matched_by_engine(&format!("[{}]", item)), matched_by_engine(special.token()), "{:?}", special);
        }
    }

    #[test]
    fn digit_table() {
        let digits: Vec<u32> = Special::Digit.codepoints(&Universe::ascii()).points().collect();
        assert_eq!(digits, (48..=57).collect::<Vec<_>>());
    }

    #[test]
    fn negations_complement_in_universe() {
        let u = Universe::new(32, 126).unwrap();
        let d = Special::Digit.codepoints(&u);
        let nd = Special::NotDigit.codepoints(&u);
        assert!(d.intersection(&nd).is_empty());
        assert_eq!(d.union(&nd), u.full());
    }

    #[test]
    fn anchors_match_no_codepoint() {
        assert!(Special::AnchorStart.codepoints(&Universe::ascii()).is_empty());
        assert!(Special::AnchorEnd.is_anchor());
        assert_eq!(Special::AnchorEnd.class_item(), None);
    }

    #[test]
    fn tables_clip_to_universe() {
        let u = Universe::new(0, 127).unwrap();
        assert_eq!(Special::Word.codepoints(&u).len(), 63);
        assert_eq!(Special::Whitespace.codepoints(&u).len(), 6);
    }
}
