/**
 * Compositional regex construction with a simplifying pattern algebra.
 *
 * Patterns are immutable values built from typed constructors. Combining
 * char-level patterns with `|` and `&` resolves them into codepoint sets
 * and renders the result back in canonical minimal class syntax, while
 * compatible repetitions of the same sub-pattern collapse into one.
 */

mod algebra;
mod canonical;
mod error;
mod extension;
mod matching;
mod ops;
mod pattern;
mod quantifier;
mod render;
mod resolve;
mod special;
mod universe;

/// The set of codepoints a char-level pattern matches.
pub type CodepointSet = rf_intervals::IntervalSet<u32>;

pub use algebra::{SetOp, combine, concat, intersect_of, join, set_algebra, union_of};
pub use canonical::canonicalize;
pub use error::{ConstructionError, Error};
pub use extension::{Extension, GroupRef};
pub use pattern::{Bounds, Kind, Node, Pattern};
pub use quantifier::{Repetition, merge};
pub use resolve::resolve;
pub use special::{
    Special,
    any, anchor_end, anchor_start, digit, not_digit, not_whitespace, not_word, whitespace, word,
};
pub use universe::Universe;
