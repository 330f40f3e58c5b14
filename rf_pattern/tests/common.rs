use rf_intervals::Interval;
use rf_pattern::{CodepointSet, Pattern, Universe};

pub fn set_of(ivs: &[(u32, u32)]) -> CodepointSet {
    ivs.iter()
        .map(|&(a, b)| Interval::new(a.min(b), a.max(b)).unwrap())
        .collect()
}

/// The codepoints of the universe the compiled pattern matches on its own.
pub fn matched_codepoints(pattern: &Pattern, universe: &Universe) -> Vec<u32> {
    let anchored = regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap();
    universe.interval()
        .iter()
        .filter(|&cp| {
            let c = char::from_u32(cp).unwrap();
            anchored.is_match(c.encode_utf8(&mut [0; 4]))
        })
        .collect()
}
