/**
 * The immutable pattern object model.
 *
 * A pattern is a shared handle to a node of one flat sum type. The node's
 * rendered form is computed once at construction and is the basis of
 * equality and hashing.
 */

use std::sync::{Arc, OnceLock};
use crate::CodepointSet;
use crate::error::{ConstructionError, Error};
use crate::extension::{Extension, GroupRef};
use crate::render;
use crate::special::Special;
use crate::universe::Universe;

/// What a pattern can take part in when combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Matches exactly one character out of a codepoint set.
    CharLevel,
    /// Repeats a sub-pattern a bounded or unbounded number of times.
    Quantifier,
    /// Everything else, the algebra only wraps these.
    Composite,
}

/// Repetition count of an `Amount`. A missing `max` without `or_more`
/// means exactly `min` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: u32,
    pub max: Option<u32>,
    pub or_more: bool,
}

impl Bounds {
    pub fn exactly(n: u32) -> Self {
        Self{ min: n, max: None, or_more: false }
    }

    pub fn between(min: u32, max: u32) -> Self {
        Self{ min, max: Some(max), or_more: false }
    }

    pub fn at_least(min: u32) -> Self {
        Self{ min, max: None, or_more: true }
    }

    /// The highest repetition count, `None` when unbounded.
    pub fn upper(&self) -> Option<u32> {
        if self.or_more { None } else { Some(self.max.unwrap_or(self.min)) }
    }

    pub(crate) fn validate(&self) -> Result<(), ConstructionError> {
        match self.max {
            Some(max) if self.or_more => Err(ConstructionError::BoundedOrMore{ max }),
            Some(max) if max < self.min => Err(ConstructionError::ReversedBounds{ min: self.min, max }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    // Char-level
    Char(char),
    Range(char, char),
    Set(Vec<Pattern>),
    NotSet(Vec<Pattern>),
    Special(Special),

    // Quantifiers
    Amount{
        sub: Pattern,
        bounds: Bounds,
        greedy: bool,
    },
    Multi{
        sub: Pattern,
        match_zero: bool,
        greedy: bool,
    },
    Optional{
        sub: Pattern,
        greedy: bool,
    },

    // Composites
    Text(String),
    Raw(String),
    Sequence(Vec<Pattern>),
    Or(Vec<Pattern>),
    Extension{
        extension: Extension,
        sub: Pattern,
    },
    IfGroup{
        group: GroupRef,
        yes: Pattern,
        no: Pattern,
    },
    NamedReference(String),
    NumberedReference(u32),
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Char(_) | Node::Range(..) | Node::Set(_) | Node::NotSet(_) => Kind::CharLevel,
            Node::Special(special) if !special.is_anchor() => Kind::CharLevel,
            Node::Amount{ .. } | Node::Multi{ .. } | Node::Optional{ .. } => Kind::Quantifier,
            _ => Kind::Composite,
        }
    }
}

struct Inner {
    node: Node,
    rendered: String,
    // Write-once, keyed by the universe the set was first resolved in
    codepoints: OnceLock<(Universe, Arc<CodepointSet>)>,
}

#[derive(Clone)]
pub struct Pattern(Arc<Inner>);

impl Pattern {
    pub(crate) fn from_node(node: Node) -> Self {
        let rendered = render::render_node(&node);
        Pattern(Arc::new(Inner{ node, rendered, codepoints: OnceLock::new() }))
    }

    pub fn node(&self) -> &Node {
        &self.0.node
    }

    pub fn kind(&self) -> Kind {
        self.0.node.kind()
    }

    /// The rendered regex source.
    pub fn as_str(&self) -> &str {
        &self.0.rendered
    }

    pub fn is_char_level(&self) -> bool {
        self.kind() == Kind::CharLevel
    }

    /// Checks if the pattern matches a position rather than consuming input.
    pub fn is_zero_width(&self) -> bool {
        match self.node() {
            Node::Special(special) => special.is_anchor(),
            Node::Extension{ extension, .. } => extension.is_zero_width(),
            Node::Text(text) | Node::Raw(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Checks if the pattern opens a capturing group anywhere inside.
    /// Raw source counts as capturing when it has any parenthesis.
    pub fn has_capture(&self) -> bool {
        match self.node() {
            Node::Extension{ extension: Extension::Group | Extension::NamedGroup(_), .. } => true,
            Node::Extension{ sub, .. } => sub.has_capture(),
            Node::IfGroup{ yes, no, .. } => yes.has_capture() || no.has_capture(),
            Node::Amount{ sub, .. } | Node::Multi{ sub, .. } | Node::Optional{ sub, .. } => sub.has_capture(),
            Node::Sequence(items) | Node::Or(items) => items.iter().any(Pattern::has_capture),
            Node::Raw(source) => source.contains('('),
            _ => false,
        }
    }

    pub(crate) fn codepoint_cache(&self) -> &OnceLock<(Universe, Arc<CodepointSet>)> {
        &self.0.codepoints
    }
}

/**
 * Char-level constructors.
 */

impl Pattern {
    /// A single literal character.
    pub fn char(c: char) -> Pattern {
        Pattern::from_node(Node::Char(c))
    }

    /// Every character from `lo` to `hi` by codepoint, both included.
    pub fn range(lo: char, hi: char) -> Result<Pattern, Error> {
        if lo > hi {
            return Err(ConstructionError::ReversedRange{ lo, hi }.into());
        }
        Ok(Pattern::from_node(Node::Range(lo, hi)))
    }

    /// One character out of any of the members.
    pub fn set<I>(members: I) -> Result<Pattern, Error>
        where I : IntoIterator, I::Item : Into<Pattern> {

        Ok(Pattern::from_node(Node::Set(class_members(members)?)))
    }

    /// One character that none of the members match.
    pub fn not_set<I>(members: I) -> Result<Pattern, Error>
        where I : IntoIterator, I::Item : Into<Pattern> {

        Ok(Pattern::from_node(Node::NotSet(class_members(members)?)))
    }

    pub fn special(special: Special) -> Pattern {
        Pattern::from_node(Node::Special(special))
    }
}

fn class_members<I>(members: I) -> Result<Vec<Pattern>, Error>
    where I : IntoIterator, I::Item : Into<Pattern> {

    let mut result: Vec<Pattern> = Vec::new();
    for member in members {
        let member = member.into();
        if !member.is_char_level() {
            return Err(ConstructionError::NotCharLevel(member.as_str().into()).into());
        }
        if !result.contains(&member) {
            result.push(member);
        }
    }
    if result.is_empty() {
        return Err(ConstructionError::EmptyClass.into());
    }
    Ok(result)
}

/**
 * Quantifier constructors.
 */

impl Pattern {
    /// Repeats the sub-pattern as many times as the bounds allow, greedily.
    pub fn amount<P>(sub: P, bounds: Bounds) -> Result<Pattern, Error> where P : Into<Pattern> {
        bounds.validate()?;
        Ok(Pattern::from_node(Node::Amount{ sub: sub.into(), bounds, greedy: true }))
    }

    /// Like [`Pattern::amount`], but matching as few repetitions as possible.
    pub fn lazy_amount<P>(sub: P, bounds: Bounds) -> Result<Pattern, Error> where P : Into<Pattern> {
        bounds.validate()?;
        Ok(Pattern::from_node(Node::Amount{ sub: sub.into(), bounds, greedy: false }))
    }

    /// One or more repetitions, zero or more with `match_zero`.
    pub fn multi<P>(sub: P, match_zero: bool) -> Pattern where P : Into<Pattern> {
        Pattern::from_node(Node::Multi{ sub: sub.into(), match_zero, greedy: true })
    }

    pub fn lazy_multi<P>(sub: P, match_zero: bool) -> Pattern where P : Into<Pattern> {
        Pattern::from_node(Node::Multi{ sub: sub.into(), match_zero, greedy: false })
    }

    /// Zero or one occurrence.
    pub fn optional<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Pattern::from_node(Node::Optional{ sub: sub.into(), greedy: true })
    }

    pub fn lazy_optional<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Pattern::from_node(Node::Optional{ sub: sub.into(), greedy: false })
    }
}

/**
 * Composite constructors.
 */

impl Pattern {
    /// Literal text, escaped. A single character is a char-level pattern.
    pub fn text(text: &str) -> Pattern {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Pattern::char(c),
            _ => Pattern::from_node(Node::Text(text.into())),
        }
    }

    /// Regex source used verbatim.
    pub fn raw(source: &str) -> Pattern {
        Pattern::from_node(Node::Raw(source.into()))
    }

    /// Matches the items one after the other. Nested sequences and empty
    /// items are flattened away; no repetition fusion happens here, see
    /// [`crate::concat`] for that.
    pub fn sequence<I>(items: I) -> Pattern where I : IntoIterator, I::Item : Into<Pattern> {
        let mut flat = Vec::new();
        for item in items {
            push_sequence_item(&mut flat, item.into());
        }
        Pattern::sequence_of(flat)
    }

    pub(crate) fn sequence_of(mut items: Vec<Pattern>) -> Pattern {
        match items.len() {
            0 => Pattern::text(""),
            1 => items.remove(0),
            _ => Pattern::from_node(Node::Sequence(items)),
        }
    }

    /// Matches any of the alternatives, tried in the given order. Nested
    /// alternations are flattened and duplicates dropped, a single
    /// alternative is returned as is.
    pub fn or<I>(alternatives: I) -> Result<Pattern, Error>
        where I : IntoIterator, I::Item : Into<Pattern> {

        let mut flat: Vec<Pattern> = Vec::new();
        for alternative in alternatives {
            for alt in alternatives_of(&alternative.into()) {
                if !flat.contains(&alt) {
                    flat.push(alt);
                }
            }
        }
        match flat.len() {
            0 => Err(ConstructionError::EmptyAlternation.into()),
            1 => Ok(flat.remove(0)),
            _ => Ok(Pattern::from_node(Node::Or(flat))),
        }
    }
}

pub(crate) fn push_sequence_item(items: &mut Vec<Pattern>, item: Pattern) {
    match item.node() {
        Node::Sequence(nested) => items.extend(nested.iter().cloned()),
        Node::Text(text) if text.is_empty() => {},
        _ => items.push(item),
    }
}

/// The alternatives of an `Or`, or the pattern itself.
pub(crate) fn alternatives_of(pattern: &Pattern) -> Vec<Pattern> {
    match pattern.node() {
        Node::Or(alternatives) => alternatives.clone(),
        _ => vec![pattern.clone()],
    }
}

/**
 * Equality, hashing and printing go through the rendered form.
 */

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl std::hash::Hash for Pattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

/**
 * Conversions.
 */

impl From<char> for Pattern {
    fn from(c: char) -> Self {
        Pattern::char(c)
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::text(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::text(&text)
    }
}

impl From<Special> for Pattern {
    fn from(special: Special) -> Self {
        Pattern::special(special)
    }
}

impl From<&Pattern> for Pattern {
    fn from(pattern: &Pattern) -> Self {
        pattern.clone()
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
