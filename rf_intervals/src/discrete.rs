/**
 * Element types where every value has well-defined neighbours, so two
 * closed intervals can be checked for touching.
 */

pub trait Discrete : Copy + Ord {
    /// The next value, `None` at the top of the domain.
    fn successor(&self) -> Option<Self>;

    /// The previous value, `None` at the bottom of the domain.
    fn predecessor(&self) -> Option<Self>;

    /// Number of steps from `self` up to `other`, 0 if `other` is not above.
    fn steps_to(&self, other: &Self) -> usize;
}

/// Codepoints.
impl Discrete for u32 {
    fn successor(&self) -> Option<Self> {
        self.checked_add(1)
    }

    fn predecessor(&self) -> Option<Self> {
        self.checked_sub(1)
    }

    fn steps_to(&self, other: &Self) -> usize {
        if other > self { (*other - *self) as usize } else { 0 }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
