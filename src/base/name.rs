//! Identifier names.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// An identifier name.
///
/// Names compare by their textual representation: two `Name`s are equal
/// iff their text is equal. Storage is a [`SmolStr`], so short identifiers
/// live inline and cloning never allocates for them.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(SmolStr);

impl Name {
    /// Create a name from its text.
    pub fn new(text: &str) -> Self {
        Self(SmolStr::new(text))
    }

    /// The name's text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<SmolStr> for Name {
    fn from(text: SmolStr) -> Self {
        Self(text)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}
