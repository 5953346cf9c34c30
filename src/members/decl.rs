//! The collector's view of class declarations.
//!
//! These types are produced by the front-end's lowering of the syntax
//! tree; the collector never touches the tree itself. A [`ClassDecl`]
//! carries every field and method *visible* on the class, inherited ones
//! included, with each member recording its declaring class, so the
//! collector can tell direct declarations apart.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{Name, TextRange};

/// Member visibility, reduced to what the inclusion filter needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

impl Visibility {
    /// Whether the member is hidden from collection.
    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

/// A type as written in a declaration, uninterpreted.
///
/// The collector records these verbatim; giving them meaning is the type
/// checker's job.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TypeRef(SmolStr);

impl TypeRef {
    /// Create a type reference from its text.
    pub fn new(text: &str) -> Self {
        Self(SmolStr::new(text))
    }

    /// The reference's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({:?})", self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Identifies a field within its [`ClassDecl`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldId(pub u32);

/// Identifies a method within its [`ClassDecl`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodId(pub u32);

/// A field as the collector sees it.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeRef,
    /// The class the field is declared on.
    pub owner: Name,
    pub is_static: bool,
    pub visibility: Visibility,
    pub span: TextRange,
}

/// A method parameter, with the convention signals the accessor shape
/// checks consume.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub name: Name,
    pub ty: TypeRef,
    /// Convention-flagged self-like parameter.
    pub is_receiver: bool,
    /// Type-parameter-shaped parameter (erased generics carrier).
    pub is_type_param: bool,
}

impl ParamDecl {
    /// A plain value parameter.
    pub fn plain(name: &str, ty: &str) -> Self {
        Self {
            name: Name::new(name),
            ty: TypeRef::new(ty),
            is_receiver: false,
            is_type_param: false,
        }
    }

    /// A receiver parameter.
    pub fn receiver(ty: &str) -> Self {
        Self {
            name: Name::new("$receiver"),
            ty: TypeRef::new(ty),
            is_receiver: true,
            is_type_param: false,
        }
    }

    /// A type-parameter-shaped parameter.
    pub fn type_param(name: &str) -> Self {
        Self {
            name: Name::new(name),
            ty: TypeRef::new("TypeInfo"),
            is_receiver: false,
            is_type_param: true,
        }
    }
}

/// A method as the collector sees it.
#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: Name,
    pub return_ty: Option<TypeRef>,
    pub params: Vec<ParamDecl>,
    /// The class the method is declared on.
    pub owner: Name,
    pub is_static: bool,
    pub visibility: Visibility,
    /// Property-flag signal from metadata: this method is a language-level
    /// property accessor, independent of its name's textual shape.
    pub is_property: bool,
    pub span: TextRange,
}

/// A class with everything visible on it.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub name: Name,
    pub is_enum: bool,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// Create an empty class.
    pub fn new(name: &str, is_enum: bool) -> Self {
        Self {
            name: Name::new(name),
            is_enum,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a field (own or inherited) and get its id.
    pub fn push_field(&mut self, field: FieldDecl) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(field);
        id
    }

    /// Add a method (own or inherited) and get its id.
    pub fn push_method(&mut self, method: MethodDecl) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(method);
        id
    }

    /// The field behind an id.
    pub fn field(&self, id: FieldId) -> &FieldDecl {
        &self.fields[id.0 as usize]
    }

    /// The method behind an id.
    pub fn method(&self, id: MethodId) -> &MethodDecl {
        &self.methods[id.0 as usize]
    }

    /// Every visible field, inherited included.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldDecl)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| (FieldId(i as u32), f))
    }

    /// Every visible method, inherited included.
    pub fn methods(&self) -> impl Iterator<Item = (MethodId, &MethodDecl)> {
        self.methods
            .iter()
            .enumerate()
            .map(|(i, m)| (MethodId(i as u32), m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::synthetic_range;

    #[test]
    fn test_class_member_ids_are_positional() {
        let mut class = ClassDecl::new("Engine", false);
        let id = class.push_field(FieldDecl {
            name: Name::new("rpm"),
            ty: TypeRef::new("Int"),
            owner: Name::new("Engine"),
            is_static: false,
            visibility: Visibility::Public,
            span: synthetic_range(),
        });

        assert_eq!(id, FieldId(0));
        assert_eq!(class.field(id).name.as_str(), "rpm");
    }

    #[test]
    fn test_param_helpers() {
        assert!(ParamDecl::receiver("Engine").is_receiver);
        assert!(ParamDecl::type_param("T").is_type_param);
        let plain = ParamDecl::plain("value", "Int");
        assert!(!plain.is_receiver && !plain.is_type_param);
    }
}
