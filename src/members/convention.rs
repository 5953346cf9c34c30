//! Getter/setter naming conventions.

use crate::base::Name;

/// How a method name maps onto a property.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedAccessor {
    /// The property the method would access.
    pub property: Name,
    /// Getter shape (`get`/`is` prefix) vs. setter shape (`set`).
    pub is_getter: bool,
}

/// Parse a method name against the accessor naming convention.
///
/// - `getSpeed` is a getter for `speed`
/// - `setSpeed` is a setter for `speed`
/// - `isEnabled` is a getter for `isEnabled`; the prefix stays part of
///   the property name
/// - `getURL` keeps its capitals: the first letter is only decapitalized
///   when the name does not continue with another capital
///
/// Returns `None` for names that match no accessor shape. A match here is
/// a textual fact only; whether the method *is* an accessor is decided by
/// the property-flag signal, not by this parse.
pub fn parse_accessor_name(method: &str) -> Option<ParsedAccessor> {
    if let Some(rest) = strip_prefix_word(method, "get") {
        return Some(ParsedAccessor {
            property: decapitalize(rest),
            is_getter: true,
        });
    }
    if strip_prefix_word(method, "is").is_some() {
        return Some(ParsedAccessor {
            property: Name::new(method),
            is_getter: true,
        });
    }
    if let Some(rest) = strip_prefix_word(method, "set") {
        return Some(ParsedAccessor {
            property: decapitalize(rest),
            is_getter: false,
        });
    }
    None
}

/// Strip `prefix` only when what follows starts a new word (an uppercase
/// letter), so `getter` or `issue` do not parse as accessors.
fn strip_prefix_word<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    if rest.chars().next()?.is_uppercase() {
        Some(rest)
    } else {
        None
    }
}

/// Lower the first letter unless the second is also uppercase
/// (`URL` stays `URL`, `Speed` becomes `speed`).
fn decapitalize(text: &str) -> Name {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Name::new(text);
    };
    if chars.next().is_some_and(char::is_uppercase) {
        return Name::new(text);
    }

    let mut out = String::with_capacity(text.len());
    out.extend(first.to_lowercase());
    out.push_str(&text[first.len_utf8()..]);
    Name::new(&out)
}
