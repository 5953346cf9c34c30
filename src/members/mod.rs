//! Per-class member grouping.
//!
//! Scans a class's fields and methods once and groups them by logical
//! name, synthesizing property-accessor descriptors from getter/setter
//! naming conventions:
//! - [`ClassDecl`] and friends - the collector's view of declarations
//! - [`parse_accessor_name`] - the textual accessor convention
//! - [`collect`] - one static-or-instance pass over a class
//! - [`MemberGroups`] - the per-name result, queryable downstream
//!
//! Depends only on `base`.

mod collect;
mod convention;
mod decl;

pub use collect::{
    AccessorKind, CollectError, ConventionMode, MemberGroups, MemberRef, NamedMemberGroup,
    PropertyAccessor, collect,
};
pub use convention::{ParsedAccessor, parse_accessor_name};
pub use decl::{ClassDecl, FieldDecl, FieldId, MethodDecl, MethodId, ParamDecl, TypeRef, Visibility};
