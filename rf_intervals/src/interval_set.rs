/**
 * Stores a set of disjunct intervals, unifying them when possible.
 *
 * The intervals are kept sorted and maximal: no two stored intervals
 * overlap or touch, so every stored interval is a run of consecutive
 * elements with at least one absent element on each side.
 */

use crate::discrete::Discrete;
use crate::interval::Interval;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IntervalSet<T> {
    pub(crate) intervals: Vec<Interval<T>>,
}

impl <T> IntervalSet<T> {
    pub fn new() -> Self {
        IntervalSet{ intervals: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The maximal runs of the set in ascending order.
    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }
}

impl <T> Default for IntervalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl <T> IntervalSet<T> where T : Discrete {
    /// Inserts an interval into the set, unifying every touching and
    /// overlapping entry.
    pub fn insert(&mut self, value: Interval<T>) {
        // Everything before `start` ends with a gap before the new value,
        // everything from `end` on starts with a gap after it
        let start = self.intervals.partition_point(|x| x.is_apart_before(&value));
        let end = self.intervals.partition_point(|x| !value.is_apart_before(x));
        assert!(end >= start);

        if start == end {
            // Intersects or touches nothing, just insert
            self.intervals.insert(start, value);
        }
        else {
            // Unify with every entry in range, keeping the first slot
            let lower = std::cmp::min(self.intervals[start].lower, value.lower);
            let upper = std::cmp::max(self.intervals[end - 1].upper, value.upper);
            self.intervals[start] = Interval{ lower, upper };
            self.intervals.drain((start + 1)..end);
        }
    }

    /// Checks if an element is in the set.
    pub fn contains(&self, element: &T) -> bool {
        let idx = self.intervals.partition_point(|x| &x.upper < element);
        idx < self.intervals.len() && self.intervals[idx].contains(element)
    }

    /// The number of elements in the set.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(Interval::len).sum()
    }

    /// Iterates every element in ascending order.
    pub fn points(&self) -> impl Iterator<Item = T> + '_ {
        self.intervals.iter().flat_map(Interval::iter)
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for iv in &other.intervals {
            result.insert(*iv);
        }
        result
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Vec::new();
        let mut i = 0;
        let mut j = 0;
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = &self.intervals[i];
            let b = &other.intervals[j];
            if let Some(common) = a.intersection(b) {
                result.push(common);
            }
            // Advance whichever ends first, it can't meet anything else
            if a.upper < b.upper {
                i += 1;
            }
            else {
                j += 1;
            }
        }
        IntervalSet{ intervals: result }
    }

    /// Every element of `bounds` that is not in this set.
    pub fn complement_within(&self, bounds: &Interval<T>) -> Self {
        let mut result = Vec::new();
        let mut next = Some(bounds.lower);
        for iv in &self.intervals {
            let from = match next {
                Some(x) => x,
                None => break,
            };
            if iv.upper < from {
                continue;
            }
            if iv.lower > bounds.upper {
                break;
            }
            if let Some(before) = iv.lower.predecessor() {
                if let Some(gap) = Interval::new(from, std::cmp::min(before, bounds.upper)) {
                    result.push(gap);
                }
            }
            next = iv.upper.successor();
        }
        if let Some(from) = next {
            if let Some(gap) = Interval::new(from, bounds.upper) {
                result.push(gap);
            }
        }
        IntervalSet{ intervals: result }
    }

    pub fn difference(&self, other: &Self) -> Self {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => {
                let hull = Interval{ lower: first.lower, upper: last.upper };
                self.intersection(&other.complement_within(&hull))
            },
            _ => Self::new(),
        }
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        &self.intersection(other) == self
    }
}

impl <T> From<Interval<T>> for IntervalSet<T> {
    fn from(value: Interval<T>) -> Self {
        IntervalSet{ intervals: vec![value] }
    }
}

impl <T> std::iter::FromIterator<Interval<T>> for IntervalSet<T> where T : Discrete {
    fn from_iter<I>(iter: I) -> Self where I : IntoIterator<Item = Interval<T>> {
        let mut result = Self::new();
        for iv in iter {
            result.insert(iv);
        }
        result
    }
}

impl <T> std::fmt::Debug for IntervalSet<T> where T : std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.intervals.iter()).finish()
    }
}

/// Sorts the elements and partitions them into maximal runs of consecutive
/// values, in ascending order. Duplicates are ignored.
pub fn group_runs<T, I>(points: I) -> Vec<Interval<T>>
    where I : IntoIterator<Item = T>, T : Discrete {

    let mut sorted: Vec<T> = points.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<Interval<T>> = Vec::new();
    for x in sorted {
        match runs.last_mut() {
            Some(run) if run.upper.successor() == Some(x) => run.upper = x,
            _ => runs.push(Interval::singleton(x)),
        }
    }
    runs
}

// Tests ///////////////////////////////////////////////////////////////////////
