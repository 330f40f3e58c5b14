/**
 * Rendering nodes into regex source for the host engine.
 */

use crate::pattern::{Bounds, Node, Pattern};

/// Characters with a meaning outside of a bracketed class.
const META: &str = r"\.+*?()|[]{}^$#&-~";

/// Characters with a meaning inside of a bracketed class.
const CLASS_META: &str = r"\[]^-&~";

pub(crate) fn push_escaped(out: &mut String, c: char, in_class: bool) {
    let meta = if in_class { CLASS_META } else { META };
    match c {
        '\t' => out.push_str(r"\t"),
        '\n' => out.push_str(r"\n"),
        '\r' => out.push_str(r"\r"),
        c if c.is_control() => out.push_str(&format!(r"\x{:02X}", c as u32)),
        c if meta.contains(c) => {
            out.push('\\');
            out.push(c);
        },
        c => out.push(c),
    }
}

/// Checks if quantifying or sequencing the pattern needs no extra group.
fn is_atomic(pattern: &Pattern) -> bool {
    match pattern.node() {
        Node::Char(_) | Node::Range(..) | Node::Set(_) | Node::NotSet(_) | Node::Special(_) => true,
        Node::Extension{ .. } | Node::IfGroup{ .. } => true,
        Node::NamedReference(_) | Node::NumberedReference(_) => true,
        Node::Raw(source) => source.chars().count() == 1,
        _ => false,
    }
}

fn push_grouped(out: &mut String, pattern: &Pattern) {
    out.push_str("(?:");
    out.push_str(pattern.as_str());
    out.push(')');
}

fn push_atom(out: &mut String, pattern: &Pattern) {
    if is_atomic(pattern) {
        out.push_str(pattern.as_str());
    }
    else {
        push_grouped(out, pattern);
    }
}

/// Renders a member of a bracketed class without its own brackets.
fn push_class_item(out: &mut String, member: &Pattern) {
    match member.node() {
        Node::Char(c) => push_escaped(out, *c, true),
        Node::Range(lo, hi) => {
            push_escaped(out, *lo, true);
            out.push('-');
            push_escaped(out, *hi, true);
        },
        Node::Special(special) => out.push_str(special.class_item().unwrap_or_default()),
        // Nested classes keep their brackets, the engine unions them
        _ => out.push_str(member.as_str()),
    }
}

fn push_class(out: &mut String, members: &[Pattern], negated: bool) {
    out.push('[');
    if negated {
        out.push('^');
    }
    for member in members {
        push_class_item(out, member);
    }
    out.push(']');
}

fn push_bounds(out: &mut String, bounds: &Bounds) {
    match (bounds.max, bounds.or_more) {
        (_, true) => out.push_str(&format!("{{{},}}", bounds.min)),
        (Some(max), false) if max != bounds.min => out.push_str(&format!("{{{},{}}}", bounds.min, max)),
        _ => out.push_str(&format!("{{{}}}", bounds.min)),
    }
}

fn push_laziness(out: &mut String, greedy: bool) {
    if !greedy {
        out.push('?');
    }
}

fn push_sequence(out: &mut String, items: &[Pattern]) {
    for (idx, item) in items.iter().enumerate() {
        let next_is_digit = items.get(idx + 1)
            .and_then(|next| next.as_str().chars().next())
            .map_or(false, |c| c.is_ascii_digit());
        match item.node() {
            Node::Or(_) | Node::Raw(_) if !is_atomic(item) => push_grouped(out, item),
            // `\1` followed by `0` would read as `\10`
            Node::NumberedReference(_) if next_is_digit => push_grouped(out, item),
            _ => out.push_str(item.as_str()),
        }
    }
}

pub(crate) fn render_node(node: &Node) -> String {
    let mut out = String::new();
    match node {
        Node::Char(c) => push_escaped(&mut out, *c, false),
        Node::Range(lo, hi) => {
            out.push('[');
            push_escaped(&mut out, *lo, true);
            out.push('-');
            push_escaped(&mut out, *hi, true);
            out.push(']');
        },
        Node::Set(members) => push_class(&mut out, members, false),
        Node::NotSet(members) => push_class(&mut out, members, true),
        Node::Special(special) => out.push_str(special.token()),

        Node::Amount{ sub, bounds, greedy } => {
            push_atom(&mut out, sub);
            push_bounds(&mut out, bounds);
            push_laziness(&mut out, *greedy);
        },
        Node::Multi{ sub, match_zero, greedy } => {
            push_atom(&mut out, sub);
            out.push(if *match_zero { '*' } else { '+' });
            push_laziness(&mut out, *greedy);
        },
        Node::Optional{ sub, greedy } => {
            push_atom(&mut out, sub);
            out.push('?');
            push_laziness(&mut out, *greedy);
        },

        Node::Text(text) => {
            for c in text.chars() {
                push_escaped(&mut out, c, false);
            }
        },
        Node::Raw(source) => out.push_str(source),
        Node::Sequence(items) => push_sequence(&mut out, items),
        Node::Or(alternatives) => {
            for (idx, alternative) in alternatives.iter().enumerate() {
                if idx > 0 {
                    out.push('|');
                }
                out.push_str(alternative.as_str());
            }
        },
        Node::Extension{ extension, sub } => {
            out.push_str(&extension.prefix());
            out.push_str(sub.as_str());
            out.push(')');
        },
        Node::IfGroup{ group, yes, no } => {
            out.push_str(&format!("(?({})", group));
            out.push_str(yes.as_str());
            out.push('|');
            out.push_str(no.as_str());
            out.push(')');
        },
        Node::NamedReference(name) => out.push_str(&format!("(?P={})", name)),
        Node::NumberedReference(index) => out.push_str(&format!(r"\{}", index)),
    }
    out
}
