/**
 * Resolution of char-level patterns into the set of codepoints they match.
 */

use std::sync::Arc;
use rf_intervals::Interval;
use crate::CodepointSet;
use crate::error::{ConstructionError, Error};
use crate::pattern::{Node, Pattern};
use crate::universe::Universe;

/// Computes the codepoints a char-level pattern matches inside the universe.
///
/// The result is cached on the pattern for the first universe it is
/// resolved in; resolving the same instance again in that universe is free.
pub fn resolve(pattern: &Pattern, universe: &Universe) -> Result<Arc<CodepointSet>, Error> {
    if let Some((resolved_in, set)) = pattern.codepoint_cache().get() {
        if resolved_in == universe {
            return Ok(Arc::clone(set));
        }
    }

    let set = Arc::new(compute(pattern, universe)?);
    tracing::trace!(pattern = %pattern, runs = set.intervals().len(), "resolved codepoints");
    // Losing a race only means an equal set is already cached
    let _ = pattern.codepoint_cache().set((*universe, Arc::clone(&set)));
    Ok(set)
}

fn compute(pattern: &Pattern, universe: &Universe) -> Result<CodepointSet, Error> {
    match pattern.node() {
        Node::Char(c) => {
            let cp = universe.check(*c as u32)?;
            Ok(CodepointSet::from(Interval::singleton(cp)))
        },
        Node::Range(lo, hi) => {
            let lower = universe.check(*lo as u32)?;
            let upper = universe.check(*hi as u32)?;
            Ok(Interval::new(lower, upper).map(CodepointSet::from).unwrap_or_default())
        },
        Node::Special(special) if !special.is_anchor() => Ok(special.codepoints(universe)),
        Node::Set(members) => union_of_members(members, universe),
        Node::NotSet(members) => Ok(union_of_members(members, universe)?.complement_within(&universe.interval())),
        _ => Err(ConstructionError::NotCharLevel(pattern.as_str().into()).into()),
    }
}

fn union_of_members(members: &[Pattern], universe: &Universe) -> Result<CodepointSet, Error> {
    let mut result = CodepointSet::new();
    for member in members {
        result = result.union(&*resolve(member, universe)?);
    }
    Ok(result)
}

// Tests ///////////////////////////////////////////////////////////////////////
