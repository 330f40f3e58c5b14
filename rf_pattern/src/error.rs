/**
 * Errors raised while constructing or combining patterns.
 */

use crate::universe::Universe;

/// Everything that can go wrong building or combining a pattern. There is no
/// partial result: a failed operation yields no pattern at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("codepoint {codepoint:#04x} lies outside the universe {universe}")]
    UniverseOverflow{
        codepoint: u32,
        universe: Universe,
    },

    #[error("cannot intersect `{left}` with `{right}`, intersection is only defined between char-level patterns")]
    UnsupportedCombination{
        left: String,
        right: String,
    },
}

/// The concrete reason a pattern could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("range start {lo:?} is after its end {hi:?}")]
    ReversedRange{
        lo: char,
        hi: char,
    },

    #[error("repetition maximum {max} is below its minimum {min}")]
    ReversedBounds{
        min: u32,
        max: u32,
    },

    #[error("repetition cannot have both a maximum ({max}) and `or more`")]
    BoundedOrMore{
        max: u32,
    },

    #[error("character class matches nothing")]
    EmptyClass,

    #[error("alternation needs at least one alternative")]
    EmptyAlternation,

    #[error("`{0}` is not a char-level pattern")]
    NotCharLevel(String),

    #[error("invalid group name {0:?}")]
    InvalidGroupName(String),

    #[error("comment {0:?} must not contain `)`")]
    InvalidComment(String),

    #[error("universe [{first:#04x}; {last:#04x}] must be a non-empty part of 0x00..=0xff")]
    InvalidUniverse{
        first: u32,
        last: u32,
    },
}
