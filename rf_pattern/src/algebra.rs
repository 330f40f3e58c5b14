/**
 * Combining patterns.
 *
 * Unions and intersections of char-level patterns go through their
 * codepoint sets and come back canonical. Unions of repetitions of the same
 * sub-pattern merge where their counts allow. Everything else falls back to
 * an alternation.
 */

use crate::CodepointSet;
use crate::canonical::canonicalize;
use crate::error::Error;
use crate::pattern::{Kind, Node, Pattern, alternatives_of, push_sequence_item};
use crate::quantifier::{self, Repetition};
use crate::resolve::resolve;
use crate::universe::Universe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    Union,
    Intersect,
}

/// Applies the set operation on two resolved codepoint sets.
pub fn set_algebra(x: &CodepointSet, y: &CodepointSet, op: SetOp) -> CodepointSet {
    match op {
        SetOp::Union => x.union(y),
        SetOp::Intersect => x.intersection(y),
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(left = %left, right = %right, ?op))]
pub fn combine(left: &Pattern, right: &Pattern, op: SetOp, universe: &Universe) -> Result<Pattern, Error> {
    match op {
        SetOp::Union => union_of(left, right, universe),
        SetOp::Intersect => intersect_of(left, right, universe),
    }
}

/// A pattern matching whatever either operand matches.
///
/// Alternatives that don't simplify come back ordered by rendered form,
/// not operand order. The host engine tries alternatives leftmost first,
/// so where one alternative is a prefix of another the reordering changes
/// which match is reported: `ab` united with `a` renders `a|ab`.
pub fn union_of(left: &Pattern, right: &Pattern, universe: &Universe) -> Result<Pattern, Error> {
    if is_or(left) || is_or(right) {
        let all = alternatives_of(left).into_iter().chain(alternatives_of(right));
        return fold_alternatives(all, universe);
    }
    match merge_pair(left, right, universe)? {
        Some(merged) => Ok(merged),
        None => sorted_or(vec![left.clone(), right.clone()]),
    }
}

/// A char-level pattern matching the characters both operands match.
pub fn intersect_of(left: &Pattern, right: &Pattern, universe: &Universe) -> Result<Pattern, Error> {
    if !left.is_char_level() || !right.is_char_level() {
        return Err(Error::UnsupportedCombination{ left: left.as_str().into(), right: right.as_str().into() });
    }
    char_level(left, right, SetOp::Intersect, universe)
}

fn char_level(left: &Pattern, right: &Pattern, op: SetOp, universe: &Universe) -> Result<Pattern, Error> {
    let x = resolve(left, universe)?;
    let y = resolve(right, universe)?;
    canonicalize(&set_algebra(&x, &y, op), universe)
}

fn is_or(pattern: &Pattern) -> bool {
    matches!(pattern.node(), Node::Or(_))
}

/// Simplifies the union of two non-alternation patterns, `None` if they
/// can't be expressed as one.
fn merge_pair(left: &Pattern, right: &Pattern, universe: &Universe) -> Result<Option<Pattern>, Error> {
    if left == right {
        return Ok(Some(left.clone()));
    }
    match (left.kind(), right.kind()) {
        (Kind::CharLevel, Kind::CharLevel) => char_level(left, right, SetOp::Union, universe).map(Some),
        (Kind::Quantifier, Kind::Quantifier) => {
            let merged = match (Repetition::of(left), Repetition::of(right)) {
                (Some(a), Some(b)) => quantifier::merge(&canonical_sub(a, universe), &canonical_sub(b, universe)),
                _ => None,
            };
            Ok(merged.map(Repetition::into_pattern))
        },
        _ => Ok(None),
    }
}

/// Merges alternatives pairwise until nothing merges any more.
fn fold_alternatives<I>(alternatives: I, universe: &Universe) -> Result<Pattern, Error>
    where I : IntoIterator<Item = Pattern> {

    let mut survivors: Vec<Pattern> = Vec::new();
    for alternative in alternatives {
        absorb(&mut survivors, alternative, universe)?;
    }
    sorted_or(survivors)
}

fn absorb(survivors: &mut Vec<Pattern>, mut candidate: Pattern, universe: &Universe) -> Result<(), Error> {
    // A merged candidate may now merge with survivors it didn't before
    'retry: loop {
        for idx in 0..survivors.len() {
            if let Some(merged) = merge_pair(&survivors[idx], &candidate, universe)? {
                survivors.remove(idx);
                candidate = merged;
                continue 'retry;
            }
        }
        survivors.push(candidate);
        return Ok(());
    }
}

/// The repetition with a char-level sub-pattern in canonical form, so that
/// repeating `[0-9]` and repeating `\d` count as the same sub-pattern.
fn canonical_sub(rep: Repetition, universe: &Universe) -> Repetition {
    if !rep.sub.is_char_level() {
        return rep;
    }
    match resolve(&rep.sub, universe).and_then(|set| canonicalize(&set, universe)) {
        Ok(sub) => Repetition{ sub, ..rep },
        Err(_) => rep,
    }
}

/// Alternation ordered by rendered form, so the result does not depend on
/// operand order.
fn sorted_or(mut alternatives: Vec<Pattern>) -> Result<Pattern, Error> {
    alternatives.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    Pattern::or(alternatives)
}

/// Matches `left` then `right`. Identical operands repeat as a whole, so
/// `ab + ab` is `(?:ab){2}`. Otherwise, where the seam repeats the same
/// sub-pattern, the two repetitions there fuse into one quantifier.
///
/// Char-level sub-patterns are compared in the default universe.
pub fn concat(left: &Pattern, right: &Pattern) -> Pattern {
    if let Some(whole) = fuse_pair(left, right) {
        return whole;
    }
    let mut items = Vec::new();
    push_sequence_item(&mut items, left.clone());
    let mut rest = Vec::new();
    push_sequence_item(&mut rest, right.clone());

    let mut rest = rest.into_iter();
    if let Some(first) = rest.next() {
        let fused = items.last().and_then(|last| fuse_pair(last, &first));
        match fused {
            Some(fused) => {
                items.pop();
                items.push(fused);
            },
            None => items.push(first),
        }
    }
    items.extend(rest);
    Pattern::sequence_of(items)
}

fn fuse_pair(left: &Pattern, right: &Pattern) -> Option<Pattern> {
    if !is_fusible(left) || !is_fusible(right) {
        return None;
    }
    let universe = Universe::default();
    let a = canonical_sub(Repetition::of_any(left), &universe);
    let b = canonical_sub(Repetition::of_any(right), &universe);
    quantifier::fuse(&a, &b).map(Repetition::into_pattern)
}

/// Zero-width items have no count to add, and repeating a capturing group
/// under one quantifier would change the group numbering.
fn is_fusible(pattern: &Pattern) -> bool {
    !pattern.is_zero_width() && !pattern.has_capture() && !matches!(pattern.node(), Node::IfGroup{ .. })
}

/// Concatenates all the patterns in order.
pub fn join<I>(patterns: I) -> Pattern where I : IntoIterator, I::Item : Into<Pattern> {
    patterns.into_iter()
        .fold(Pattern::text(""), |acc, p| concat(&acc, &p.into()))
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod algebra_tests {
    use super::*;
    use crate::error::ConstructionError;
    use crate::extension::GroupRef;
    use crate::pattern::Bounds;
    use crate::special::{anchor_start, digit, word, whitespace};
    use pretty_assertions::assert_eq;

    fn u() -> Universe {
        Universe::ascii()
    }

    fn r(lo: char, hi: char) -> Pattern {
        Pattern::range(lo, hi).unwrap()
    }

    fn amount(sub: &str, min: u32, max: u32) -> Pattern {
        Pattern::amount(sub, Bounds::between(min, max)).unwrap()
    }

    fn union(a: &Pattern, b: &Pattern) -> Pattern {
        union_of(a, b, &u()).unwrap()
    }

    /**
     * Char-level unions.
     */

    #[test]
    fn overlapping_ranges_become_digit() {
        assert_eq!(union(&r('0', '4'), &r('3', '9')), digit());
    }

    #[test]
    fn single_chars_join_a_set() {
        let a = Pattern::set(vec!['1']).unwrap();
        let b = Pattern::set(vec!['2']).unwrap();
        assert_eq!(union(&a, &b).as_str(), "[12]");
    }

    #[test]
    fn subsets_are_absorbed() {
        assert_eq!(union(&r('0', '5'), &word()), word());
        assert_eq!(union(&digit(), &word()), word());
    }

    #[test]
    fn separated_ranges_share_a_set() {
        assert_eq!(union(&r('0', '4'), &r('7', '9')).as_str(), "[0-47-9]");
    }

    #[test]
    fn negated_sets_cover_everything() {
        let a = Pattern::not_set(vec!['a']).unwrap();
        let b = Pattern::not_set(vec!['b']).unwrap();
        assert_eq!(union(&a, &b).as_str(), "(?s:.)");
    }

    #[test]
    fn char_level_union_overflowing_universe() {
        let narrow = Universe::new(0, 127).unwrap();
        assert_eq!(
            union_of(&Pattern::char('a'), &Pattern::char('é'), &narrow),
            Err(Error::UniverseOverflow{ codepoint: 0xE9, universe: narrow })
        );
    }

    /**
     * Intersections.
     */

    #[test]
    fn intersection_of_ranges() {
        assert_eq!(intersect_of(&r('a', 'm'), &r('h', 'z'), &u()).unwrap().as_str(), "[h-m]");
    }

    #[test]
    fn intersection_of_word_and_not_digit() {
        let letters = intersect_of(&word(), &Pattern::not_set(vec![digit(), Pattern::from('_')]).unwrap(), &u()).unwrap();
        let expected = Pattern::set(vec![r('A', 'Z'), r('a', 'z'), Pattern::from('ª'), Pattern::from('µ'),
            Pattern::from('º'), r('À', 'Ö'), r('Ø', 'ö'), r('ø', 'ÿ')]).unwrap();
        assert_eq!(letters, expected);
    }

    #[test]
    fn empty_intersection_fails() {
        assert_eq!(
            intersect_of(&digit(), &whitespace(), &u()),
            Err(Error::Construction(ConstructionError::EmptyClass))
        );
    }

    #[test]
    fn intersection_needs_char_level() {
        let a = amount("a", 1, 2);
        assert_eq!(
            intersect_of(&a, &digit(), &u()),
            Err(Error::UnsupportedCombination{ left: "a{1,2}".into(), right: r"\d".into() })
        );
        assert!(intersect_of(&a, &a, &u()).is_err());
    }

    /**
     * Quantifier unions.
     */

    #[test]
    fn overlapping_amounts_merge() {
        assert_eq!(union(&amount("x", 2, 3), &amount("x", 3, 5)), amount("x", 2, 5));
    }

    #[test]
    fn amounts_of_different_patterns_alternate() {
        let a = amount("a", 1, 2);
        let b = amount("b", 1, 2);
        assert_eq!(union(&a, &b), Pattern::or(vec![a.clone(), b.clone()]).unwrap());
        assert_eq!(union(&b, &a).as_str(), "a{1,2}|b{1,2}");
    }

    #[test]
    fn disjoint_amounts_alternate() {
        assert_eq!(union(&amount("x", 1, 2), &amount("x", 4, 5)).as_str(), "x{1,2}|x{4,5}");
    }

    #[test]
    fn optional_and_multi_merge() {
        assert_eq!(union(&Pattern::optional(digit()), &Pattern::multi(digit(), false)).as_str(), r"\d*");
        let at_least_two = Pattern::amount(digit(), Bounds::at_least(2)).unwrap();
        assert_eq!(union(&Pattern::multi(digit(), false), &at_least_two).as_str(), r"\d+");
    }

    /**
     * Everything else.
     */

    #[test]
    fn identical_patterns_union_to_themselves() {
        let p = Pattern::text("abc");
        assert_eq!(union(&p, &p), p);
    }

    #[test]
    fn mixed_kinds_alternate() {
        let p = union(&r('0', '4'), &amount("2", 1, 2));
        assert_eq!(p.as_str(), "2{1,2}|[0-4]");
        assert_eq!(union(&Pattern::text("cat"), &anchor_start()).as_str(), "^|cat");
    }

    #[test]
    fn alternations_fold() {
        let split = Pattern::or(vec![r('0', '4'), r('7', '9')]).unwrap();
        assert_eq!(union(&r('4', '7'), &split), digit());
    }

    #[test]
    fn alternations_merge_member_wise() {
        let left = Pattern::or(vec![Pattern::text("cat"), amount("x", 1, 2)]).unwrap();
        let right = Pattern::or(vec![amount("x", 3, 4), Pattern::text("dog"), Pattern::from('a')]).unwrap();
        assert_eq!(union(&left, &right).as_str(), "a|cat|dog|x{1,4}");
    }

    #[test]
    fn union_is_commutative() {
        let cases = vec![
            (r('a', 'f'), digit()),
            (amount("x", 1, 2), amount("y", 1, 2)),
            (Pattern::text("cat"), Pattern::or(vec!["dog", "cow"]).unwrap()),
        ];
        for (a, b) in cases {
            assert_eq!(union(&a, &b), union(&b, &a));
        }
    }

    #[test]
    fn combine_dispatches() {
        assert_eq!(combine(&r('a', 'c'), &r('b', 'd'), SetOp::Union, &u()).unwrap().as_str(), "[a-d]");
        assert_eq!(combine(&r('a', 'c'), &r('b', 'd'), SetOp::Intersect, &u()).unwrap().as_str(), "[bc]");
    }

    /**
     * Concatenation.
     */

    #[test]
    fn concat_plain() {
        assert_eq!(concat(&Pattern::from('a'), &Pattern::from('b')).as_str(), "ab");
        assert_eq!(concat(&Pattern::optional('#'), &digit()).as_str(), r"\#?\d");
    }

    #[test]
    fn concat_fuses_repetitions() {
        let d = digit();
        let three = Pattern::amount(&d, Bounds::exactly(3)).unwrap();
        assert_eq!(concat(&d, &d).as_str(), r"\d{2}");
        assert_eq!(concat(&three, &Pattern::amount(&d, Bounds::exactly(2)).unwrap()).as_str(), r"\d{5}");
        assert_eq!(concat(&d, &Pattern::multi(&d, true)).as_str(), r"\d+");
        assert_eq!(concat(&Pattern::multi(&d, false), &d).as_str(), r"\d{2,}");
        assert_eq!(concat(&Pattern::optional(&d), &three).as_str(), r"\d{3,4}");
        assert_eq!(concat(&three, &Pattern::amount(&d, Bounds::at_least(5)).unwrap()).as_str(), r"\d{8,}");
        assert_eq!(concat(&Pattern::multi(&d, false), &Pattern::optional(&d)).as_str(), r"\d+");
    }

    #[test]
    fn concat_fuses_at_the_seam() {
        let ba = concat(&Pattern::from('b'), &Pattern::from('a'));
        assert_eq!(concat(&ba, &Pattern::from('a')).as_str(), "ba{2}");
        let ab = Pattern::sequence(vec!['a', 'b']);
        let bc = Pattern::sequence(vec!['b', 'c']);
        assert_eq!(concat(&ab, &bc).as_str(), "ab{2}c");
        assert_eq!(concat(&ab, &Pattern::sequence(vec!['a', 'c'])).as_str(), "abac");
    }

    #[test]
    fn identical_sequences_repeat_as_a_whole() {
        let ab = Pattern::sequence(vec!['a', 'b']);
        let twice = concat(&ab, &ab);
        assert_eq!(twice, Pattern::amount(&ab, Bounds::exactly(2)).unwrap());
        assert_eq!(twice.as_str(), "(?:ab){2}");
        assert_eq!(concat(&twice, &ab).as_str(), "(?:ab){3}");
        assert_eq!(concat(&Pattern::sequence(vec![Pattern::from('a'), twice]), &ab).as_str(), "a(?:ab){2}ab");
    }

    #[test]
    fn capturing_groups_never_fuse() {
        let g = Pattern::group('a');
        assert_eq!(concat(&g, &g).as_str(), "(a)(a)");
        assert_eq!(concat(&g, &g).compile().unwrap().captures_len(), 3);
        let named = Pattern::named_group("x", 'a').unwrap();
        assert_eq!(concat(&Pattern::multi(&named, false), &named).as_str(), "(?P<x>a)+(?P<x>a)");
        let nested = Pattern::non_capturing(Pattern::sequence(vec![Pattern::group('a'), Pattern::from('b')]));
        assert_eq!(concat(&nested, &nested).as_str(), "(?:(a)b)(?:(a)b)");
        let seq = Pattern::sequence(vec![Pattern::group('a'), Pattern::from('b')]);
        assert_eq!(concat(&seq, &seq).as_str(), "(a)b(a)b");
    }

    #[test]
    fn conditionals_never_fuse() {
        let cond = Pattern::if_group(GroupRef::Index(1), 'a', 'b').unwrap();
        assert_eq!(concat(&cond, &cond).as_str(), "(?(1)a|b)(?(1)a|b)");
    }

    #[test]
    fn equivalent_char_level_subs_fuse() {
        let digits = Pattern::range('0', '9').unwrap();
        assert_eq!(concat(&digits, &digit()).as_str(), r"\d{2}");
        assert_eq!(concat(&Pattern::multi(&digits, false), &Pattern::optional(digit())).as_str(), r"\d+");
    }

    #[test]
    fn equivalent_char_level_subs_merge() {
        let a = Pattern::amount(Pattern::range('0', '9').unwrap(), Bounds::between(1, 2)).unwrap();
        let b = Pattern::amount(digit(), Bounds::between(3, 4)).unwrap();
        assert_eq!(union(&a, &b).as_str(), r"\d{1,4}");
    }

    #[test]
    fn union_orders_alternatives_by_rendered_form() {
        let p = union(&Pattern::text("ab"), &Pattern::from('a'));
        assert_eq!(p.as_str(), "a|ab");
        assert_eq!(p.find_all("ab").unwrap(), vec!["a"]);
    }

    #[test]
    fn concat_of_texts_repeats() {
        assert_eq!(concat(&Pattern::text("ab"), &Pattern::text("ab")).as_str(), "(?:ab){2}");
    }

    #[test]
    fn zero_width_never_fuses() {
        assert_eq!(concat(&anchor_start(), &anchor_start()).as_str(), "^^");
    }

    #[test]
    fn join_folds_left_to_right() {
        assert_eq!(join(vec!['a', 'a', 'a']).as_str(), "a{3}");
        assert_eq!(join(vec![Pattern::from("x"), Pattern::from(""), digit()]).as_str(), r"x\d");
        assert_eq!(join(Vec::<Pattern>::new()).as_str(), "");
    }
}
