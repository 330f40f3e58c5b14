/**
 * A closed interval over a discrete domain.
 */

use crate::discrete::Discrete;

/// Represents the interval `[lower; upper]`, both ends included
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    pub lower: T,
    pub upper: T,
}

/**
 * Constructing an interval.
 */

impl <T> Interval<T> where T : Discrete {
    /// Creates a new interval, `None` if the bounds are reversed.
    pub fn new(lower: T, upper: T) -> Option<Self> {
        if lower <= upper {
            Some(Self{ lower, upper })
        }
        else {
            None
        }
    }

    pub fn singleton(value: T) -> Self {
        Self{ lower: value, upper: value }
    }
}

/**
 * Debug-print an interval.
 */
impl <T> std::fmt::Debug for Interval<T> where T : std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        self.lower.fmt(f)?;
        write!(f, "; ")?;
        self.upper.fmt(f)?;
        write!(f, "]")
    }
}

/**
 * Info about a single interval.
 */

impl <T> Interval<T> where T : Discrete {
    /// Checks if an element is contained by the interval.
    pub fn contains(&self, element: &T) -> bool {
        &self.lower <= element && element <= &self.upper
    }

    /// The number of elements in the interval.
    pub fn len(&self) -> usize {
        self.lower.steps_to(&self.upper) + 1
    }

    /// Iterates the elements of the interval in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = T> {
        let upper = self.upper;
        std::iter::successors(Some(self.lower), move |x| {
            if *x < upper { x.successor() } else { None }
        })
    }
}

/**
 * Relation of intervals.
 */

impl <T> Interval<T> where T : Discrete {
    /// Checks if the first interval ends before the second one with at least
    /// one element between them.
    pub fn is_apart_before(&self, other: &Self) -> bool {
        match self.upper.successor() {
            Some(next) => next < other.lower,
            None => false,
        }
    }

    /// The common part of two intervals, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::new(std::cmp::max(self.lower, other.lower), std::cmp::min(self.upper, other.upper))
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
