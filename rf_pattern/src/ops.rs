/**
 * Operator sugar over the pattern algebra, in the default universe.
 *
 * `|` unions, `&` intersects, `+` concatenates and `* n` repeats. The set
 * operators can fail, so they produce a `Result`.
 */

use std::ops::{Add, BitAnd, BitOr, Mul};
use crate::algebra::{concat, intersect_of, union_of};
use crate::error::Error;
use crate::pattern::Pattern;
use crate::quantifier::Repetition;
use crate::universe::Universe;

/// See [`union_of`]: alternatives that don't simplify are ordered by
/// rendered form, which can change the leftmost-first match.
impl BitOr for &Pattern {
    type Output = Result<Pattern, Error>;

    fn bitor(self, rhs: &Pattern) -> Self::Output {
        union_of(self, rhs, &Universe::default())
    }
}

impl BitOr for Pattern {
    type Output = Result<Pattern, Error>;

    fn bitor(self, rhs: Pattern) -> Self::Output {
        &self | &rhs
    }
}

impl BitAnd for &Pattern {
    type Output = Result<Pattern, Error>;

    fn bitand(self, rhs: &Pattern) -> Self::Output {
        intersect_of(self, rhs, &Universe::default())
    }
}

impl BitAnd for Pattern {
    type Output = Result<Pattern, Error>;

    fn bitand(self, rhs: Pattern) -> Self::Output {
        &self & &rhs
    }
}

impl Add for &Pattern {
    type Output = Pattern;

    fn add(self, rhs: &Pattern) -> Self::Output {
        concat(self, rhs)
    }
}

impl Add for Pattern {
    type Output = Pattern;

    fn add(self, rhs: Pattern) -> Self::Output {
        concat(&self, &rhs)
    }
}

/// Exactly `times` repetitions; once is the pattern itself.
impl Mul<u32> for &Pattern {
    type Output = Pattern;

    fn mul(self, times: u32) -> Self::Output {
        Repetition{ sub: self.clone(), min: times, max: Some(times), greedy: true }.into_pattern()
    }
}

impl Mul<u32> for Pattern {
    type Output = Pattern;

    fn mul(self, times: u32) -> Self::Output {
        &self * times
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod ops_tests {
    use super::*;
    use crate::pattern::Bounds;
    use crate::special::{digit, word};
    use pretty_assertions::assert_eq;

    #[test]
    fn bitor_unions() {
        let hex = (Pattern::range('0', '9').unwrap() | Pattern::range('a', 'f').unwrap()).unwrap();
        assert_eq!(hex.as_str(), r"[\da-f]");
        assert_eq!((&digit() | &word()).unwrap(), word());
    }

    #[test]
    fn bitand_intersects() {
        let vowels = Pattern::set("aeiou".chars()).unwrap();
        let early = Pattern::range('a', 'f').unwrap();
        assert_eq!((&vowels & &early).unwrap().as_str(), "[ae]");
        assert!((Pattern::text("ab") & early).is_err());
    }

    #[test]
    fn add_concatenates() {
        let p = Pattern::optional('#') + digit() + digit();
        assert_eq!(p.as_str(), r"\#?\d{2}");
        assert_eq!((&Pattern::from("ab") + &Pattern::from('c')).as_str(), "abc");
    }

    #[test]
    fn mul_repeats() {
        assert_eq!((digit() * 3).as_str(), r"\d{3}");
        assert_eq!(&Pattern::from("ab") * 2, Pattern::amount("ab", Bounds::exactly(2)).unwrap());
        assert_eq!(word() * 1, word());
        assert_eq!((Pattern::from('a') * 0).as_str(), "a{0}");
    }

    #[test]
    fn mul_matches_repeated_concat() {
        let d = digit();
        assert_eq!(&d * 3, d.clone() + d.clone() + d);
    }

    #[test]
    fn bitor_reorders_alternatives() {
        let p = (Pattern::text("ab") | Pattern::from('a')).unwrap();
        assert_eq!(p.as_str(), "a|ab");
    }
}
