/**
 * The alphabet complements are computed over.
 */

use rf_intervals::Interval;
use crate::CodepointSet;
use crate::error::{ConstructionError, Error};

/// A contiguous range of codepoints. Every resolution and complement takes
/// one explicitly, the default being the 0..=255 byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Universe {
    bounds: Interval<u32>,
}

impl Universe {
    /// The highest codepoint a universe may reach, special-class tables are
    /// only exact up to here.
    pub const LAST: u32 = 0xFF;

    pub fn ascii() -> Self {
        Self{ bounds: Interval{ lower: 0, upper: Self::LAST } }
    }

    pub fn new(first: u32, last: u32) -> Result<Self, Error> {
        match Interval::new(first, last) {
            Some(bounds) if last <= Self::LAST => Ok(Self{ bounds }),
            _ => Err(ConstructionError::InvalidUniverse{ first, last }.into()),
        }
    }

    pub fn first(&self) -> u32 {
        self.bounds.lower
    }

    pub fn last(&self) -> u32 {
        self.bounds.upper
    }

    pub fn interval(&self) -> Interval<u32> {
        self.bounds
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.bounds.contains(&codepoint)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Every codepoint of the universe.
    pub fn full(&self) -> CodepointSet {
        CodepointSet::from(self.bounds)
    }

    pub(crate) fn check(&self, codepoint: u32) -> Result<u32, Error> {
        if self.contains(codepoint) {
            Ok(codepoint)
        }
        else {
            Err(Error::UniverseOverflow{ codepoint, universe: *self })
        }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::ascii()
    }
}

impl std::fmt::Display for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:#04x}; {:#04x}]", self.first(), self.last())
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod universe_tests {
    use super::*;

    #[test]
    fn default_is_byte_range() {
        let u = Universe::default();
        assert_eq!((u.first(), u.last(), u.len()), (0, 255, 256));
        assert_eq!(u.to_string(), "[0x00; 0xff]");
    }

    #[test]
    fn sub_range() {
        let u = Universe::new(32, 126).unwrap();
        assert!(u.contains(b'a' as u32));
        assert!(!u.contains(9));
        assert_eq!(u.full().len(), 95);
    }

    #[test]
    fn rejects_reversed_and_oversized() {
        assert_eq!(
            Universe::new(10, 5),
            Err(Error::Construction(ConstructionError::InvalidUniverse{ first: 10, last: 5 }))
        );
        assert!(Universe::new(0, 0x100).is_err());
    }

    #[test]
    fn check_reports_overflow() {
        let u = Universe::new(0, 127).unwrap();
        assert_eq!(u.check(65), Ok(65));
        assert_eq!(u.check(200), Err(Error::UniverseOverflow{ codepoint: 200, universe: u }));
    }
}
