/**
 * Merging repetitions of the same sub-pattern.
 *
 * Every quantifier is viewed as its sub-pattern repeated a closed or
 * half-open interval of times. Two such intervals over an identical
 * sub-pattern merge when they overlap or touch, and fuse by adding their
 * bounds when the quantifiers follow each other in a sequence.
 */

use crate::pattern::{Bounds, Node, Pattern};

/// A sub-pattern repeated `min` to `max` times, `max` being `None` when
/// there is no upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repetition {
    pub sub: Pattern,
    pub min: u32,
    pub max: Option<u32>,
    pub greedy: bool,
}

impl Repetition {
    /// The repetition a quantifier stands for, `None` for other patterns.
    pub fn of(pattern: &Pattern) -> Option<Self> {
        match pattern.node() {
            Node::Amount{ sub, bounds, greedy } =>
                Some(Self{ sub: sub.clone(), min: bounds.min, max: bounds.upper(), greedy: *greedy }),
            Node::Multi{ sub, match_zero, greedy } =>
                Some(Self{ sub: sub.clone(), min: if *match_zero { 0 } else { 1 }, max: None, greedy: *greedy }),
            Node::Optional{ sub, greedy } =>
                Some(Self{ sub: sub.clone(), min: 0, max: Some(1), greedy: *greedy }),
            _ => None,
        }
    }

    /// Like [`Repetition::of`], but any other pattern counts as itself once.
    pub(crate) fn of_any(pattern: &Pattern) -> Self {
        Self::of(pattern).unwrap_or_else(|| Self{ sub: pattern.clone(), min: 1, max: Some(1), greedy: true })
    }

    /// The shortest quantifier for the repetition.
    pub fn into_pattern(self) -> Pattern {
        let Repetition{ sub, min, max, greedy } = self;
        let node = match (min, max) {
            (1, Some(1)) => return sub,
            (0, Some(1)) => Node::Optional{ sub, greedy },
            (0, None) => Node::Multi{ sub, match_zero: true, greedy },
            (1, None) => Node::Multi{ sub, match_zero: false, greedy },
            (min, None) => Node::Amount{ sub, bounds: Bounds::at_least(min), greedy },
            (min, Some(max)) if min == max => Node::Amount{ sub, bounds: Bounds::exactly(min), greedy },
            (min, Some(max)) => Node::Amount{ sub, bounds: Bounds::between(min, max), greedy },
        };
        Pattern::from_node(node)
    }

    fn compatible(&self, other: &Self) -> bool {
        self.sub == other.sub && self.greedy == other.greedy
    }
}

/// Merges two repetitions of the same sub-pattern into one covering both
/// their counts, `None` if the counts leave a gap or the sub-patterns
/// differ.
pub fn merge(a: &Repetition, b: &Repetition) -> Option<Repetition> {
    if !a.compatible(b) {
        tracing::trace!(left = %a.sub, right = %b.sub, "different sub-patterns, not mergeable");
        return None;
    }
    let min = std::cmp::min(a.min, b.min);
    let max = match (a.max, b.max) {
        (Some(max1), Some(max2)) => {
            let lower = std::cmp::max(a.min, b.min);
            let upper = std::cmp::min(max1, max2);
            if lower > upper.saturating_add(1) {
                tracing::trace!(left = ?(a.min, max1), right = ?(b.min, max2), "disjoint counts, not mergeable");
                return None;
            }
            Some(std::cmp::max(max1, max2))
        },
        (None, Some(bounded)) => open_ended(a.min, bounded)?,
        (Some(bounded), None) => open_ended(b.min, bounded)?,
        (None, None) => None,
    };
    Some(Repetition{ sub: a.sub.clone(), min, max, greedy: a.greedy })
}

/// An open-ended count absorbs a bounded one that reaches up to its start.
fn open_ended(open_min: u32, bounded_max: u32) -> Option<Option<u32>> {
    if open_min <= bounded_max.saturating_add(1) {
        Some(None)
    }
    else {
        tracing::trace!(open_min, bounded_max, "gap before open-ended count, not mergeable");
        None
    }
}

/// The repetition of two identical sub-patterns matched one after the other.
pub(crate) fn fuse(a: &Repetition, b: &Repetition) -> Option<Repetition> {
    if !a.compatible(b) {
        return None;
    }
    let min = a.min.checked_add(b.min)?;
    let max = match (a.max, b.max) {
        (Some(max1), Some(max2)) => Some(max1.checked_add(max2)?),
        _ => None,
    };
    Some(Repetition{ sub: a.sub.clone(), min, max, greedy: a.greedy })
}

// Tests ///////////////////////////////////////////////////////////////////////
