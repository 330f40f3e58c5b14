/**
 * The templated constructs: groups, lookaround assertions, comments and
 * references. Each one is a fixed prefix and suffix around the rendered
 * form of a sub-pattern, the algebra never looks inside them.
 */

use crate::error::{ConstructionError, Error};
use crate::pattern::{Node, Pattern};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    /// `(...)`
    Group,
    /// `(?:...)`
    NonCapturing,
    /// `(?P<name>...)`
    NamedGroup(String),
    /// `(?#...)`
    Comment,
    /// `(?=...)`
    IfAhead,
    /// `(?!...)`
    IfNotAhead,
    /// `(?<=...)`
    IfBehind,
    /// `(?<!...)`
    IfNotBehind,
}

impl Extension {
    pub(crate) fn prefix(&self) -> String {
        match self {
            Extension::Group => "(".into(),
            Extension::NonCapturing => "(?:".into(),
            Extension::NamedGroup(name) => format!("(?P<{}>", name),
            Extension::Comment => "(?#".into(),
            Extension::IfAhead => "(?=".into(),
            Extension::IfNotAhead => "(?!".into(),
            Extension::IfBehind => "(?<=".into(),
            Extension::IfNotBehind => "(?<!".into(),
        }
    }

    /// Assertions and comments consume no input.
    pub(crate) fn is_zero_width(&self) -> bool {
        matches!(self,
            Extension::Comment
            | Extension::IfAhead | Extension::IfNotAhead
            | Extension::IfBehind | Extension::IfNotBehind)
    }
}

/// Names or numbers a previously defined group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupRef {
    Name(String),
    Index(u32),
}

impl std::fmt::Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRef::Name(name) => f.write_str(name),
            GroupRef::Index(index) => write!(f, "{}", index),
        }
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    };
    if valid {
        Ok(())
    }
    else {
        Err(ConstructionError::InvalidGroupName(name.into()).into())
    }
}

/**
 * Constructors.
 */

impl Pattern {
    fn extension(extension: Extension, sub: Pattern) -> Pattern {
        Pattern::from_node(Node::Extension{ extension, sub })
    }

    /// A capturing group.
    pub fn group<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::Group, sub.into())
    }

    pub fn non_capturing<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::NonCapturing, sub.into())
    }

    pub fn named_group<P>(name: &str, sub: P) -> Result<Pattern, Error> where P : Into<Pattern> {
        validate_name(name)?;
        Ok(Self::extension(Extension::NamedGroup(name.into()), sub.into()))
    }

    /// Matches the same text a named group matched.
    pub fn named_reference(name: &str) -> Result<Pattern, Error> {
        validate_name(name)?;
        Ok(Pattern::from_node(Node::NamedReference(name.into())))
    }

    /// Matches the same text the numbered group matched.
    pub fn numbered_reference(index: u32) -> Pattern {
        Pattern::from_node(Node::NumberedReference(index))
    }

    pub fn comment(content: &str) -> Result<Pattern, Error> {
        if content.contains(')') {
            return Err(ConstructionError::InvalidComment(content.into()).into());
        }
        Ok(Self::extension(Extension::Comment, Pattern::raw(content)))
    }

    pub fn if_ahead<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::IfAhead, sub.into())
    }

    pub fn if_not_ahead<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::IfNotAhead, sub.into())
    }

    pub fn if_behind<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::IfBehind, sub.into())
    }

    pub fn if_not_behind<P>(sub: P) -> Pattern where P : Into<Pattern> {
        Self::extension(Extension::IfNotBehind, sub.into())
    }

    /// Matches `yes` if the referenced group took part in the match,
    /// `no` otherwise.
    pub fn if_group<Y, N>(group: GroupRef, yes: Y, no: N) -> Result<Pattern, Error>
        where Y : Into<Pattern>, N : Into<Pattern> {

        if let GroupRef::Name(name) = &group {
            validate_name(name)?;
        }
        Ok(Pattern::from_node(Node::IfGroup{ group, yes: yes.into(), no: no.into() }))
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
