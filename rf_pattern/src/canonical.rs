/**
 * Turning a codepoint set back into the shortest char-level pattern.
 *
 * The set is rendered twice, once positively from its own runs and once
 * negated from the runs of its complement, and the shorter wins. Within a
 * rendering, named special classes take precedence over ranges, and
 * ranges over enumerated characters.
 */

use rf_intervals::group_runs;
use crate::CodepointSet;
use crate::error::{ConstructionError, Error};
use crate::pattern::Pattern;
use crate::special::Special;
use crate::universe::Universe;

/// Shortest run that is written as a range instead of single characters.
const MIN_RANGE_LEN: usize = 3;

/// Renders a codepoint set as its canonical char-level pattern.
pub fn canonicalize(set: &CodepointSet, universe: &Universe) -> Result<Pattern, Error> {
    if set.is_empty() {
        return Err(ConstructionError::EmptyClass.into());
    }
    if let Some(outside) = set.difference(&universe.full()).points().next() {
        return Err(Error::UniverseOverflow{ codepoint: outside, universe: *universe });
    }
    if let Some(special) = recognize(set, universe) {
        return Ok(Pattern::special(special));
    }

    let positive = from_runs(set, universe, false)?;
    let complement = set.complement_within(&universe.interval());
    if complement.is_empty() {
        return Ok(positive);
    }
    let negated = from_runs(&complement, universe, true)?;

    // Ties go to the positive form
    if rendered_len(&negated) < rendered_len(&positive) {
        tracing::debug!(positive = %positive, negated = %negated, "negated class is shorter");
        Ok(negated)
    }
    else {
        Ok(positive)
    }
}

fn rendered_len(pattern: &Pattern) -> usize {
    pattern.as_str().chars().count()
}

/// The special class matching exactly the set, if there is one. The whole
/// universe is always `Any`, even where a clipped table covers it too.
fn recognize(set: &CodepointSet, universe: &Universe) -> Option<Special> {
    if set == &universe.full() {
        return Some(Special::Any);
    }
    Special::RECOGNIZED.iter()
        .copied()
        .find(|special| &special.codepoints(universe) == set)
}

/// Checks if the table is exactly the union of some runs of the set, so the
/// special token can replace those runs without changing the set.
fn covers_whole_runs(set: &CodepointSet, table: &CodepointSet) -> bool {
    if table.is_empty() || !table.is_subset(set) {
        return false;
    }
    set.iter().all(|run| {
        let common = CodepointSet::from(*run).intersection(table).len();
        common == 0 || common == run.len()
    })
}

/// Emits the tokens of the set's runs and wraps them in a class, or
/// returns the lone token bare.
fn from_runs(set: &CodepointSet, universe: &Universe, negated: bool) -> Result<Pattern, Error> {
    let mut remaining = set.clone();
    let mut tokens = Vec::new();

    for special in Special::EMBEDDABLE.iter() {
        let table = special.codepoints(universe);
        if covers_whole_runs(&remaining, &table) {
            tokens.push(Pattern::special(*special));
            remaining = remaining.difference(&table);
        }
    }

    for run in group_runs(remaining.points()) {
        if run.len() >= MIN_RANGE_LEN {
            tokens.push(Pattern::range(to_char(run.lower, universe)?, to_char(run.upper, universe)?)?);
        }
        else {
            for cp in run.iter() {
                tokens.push(Pattern::char(to_char(cp, universe)?));
            }
        }
    }

    if negated {
        Pattern::not_set(tokens)
    }
    else if tokens.len() == 1 {
        Ok(tokens.remove(0))
    }
    else {
        Pattern::set(tokens)
    }
}

fn to_char(codepoint: u32, universe: &Universe) -> Result<char, Error> {
    char::from_u32(codepoint).ok_or(Error::UniverseOverflow{ codepoint, universe: *universe })
}

// Tests ///////////////////////////////////////////////////////////////////////
