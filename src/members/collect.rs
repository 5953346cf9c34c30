//! Grouping a class's members by logical name.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::trace;

use crate::base::Name;
use super::convention::parse_accessor_name;
use super::decl::{ClassDecl, FieldId, MethodId, TypeRef};

/// Where a class's members are described.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConventionMode {
    /// Members are only known through the declarations themselves;
    /// fields are scanned as property backers.
    Declarations,
    /// Members are also described by compiler metadata. The field pass is
    /// skipped (accessors carry the property information) except on
    /// enums, whose constants only exist as fields.
    Metadata,
}

/// Internal-consistency failures: the property-flag signal and the
/// accessor's parameter shape disagree. This means the input is corrupt
/// (the flag and the shape are produced by the same front-end), so
/// collection for the whole class aborts rather than recovers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectError {
    /// A flagged getter still has value parameters after its receiver and
    /// type-parameter prefix.
    #[error("getter `{method}` on `{class}` takes parameters beyond its receiver")]
    MalformedGetter { class: Name, method: Name },

    /// A flagged setter does not have exactly one value parameter after
    /// its receiver and type-parameter prefix.
    #[error("setter `{method}` on `{class}` does not take exactly one value parameter")]
    MalformedSetter { class: Name, method: Name },

    /// A flagged getter declares no return type to take the property type
    /// from.
    #[error("getter `{method}` on `{class}` declares no return type")]
    MissingReturnType { class: Name, method: Name },
}

/// A member contributing to a group.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MemberRef {
    Field(FieldId),
    Method(MethodId),
}

/// Which side of a property an accessor serves.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessorKind {
    /// A field backs the property directly.
    Field,
    Getter,
    Setter,
}

/// One property-like way of reaching a named value.
#[derive(Clone, Debug)]
pub struct PropertyAccessor {
    pub member: MemberRef,
    pub kind: AccessorKind,
    /// The property's declared type.
    pub ty: TypeRef,
    /// Receiver type, when the accessor consumes a receiver parameter.
    pub receiver: Option<TypeRef>,
}

/// All accessors and plain methods sharing one logical name.
///
/// A group exists for every name observed on the class, including names
/// only reachable through the accessor convention and names whose every
/// member was filtered out. Downstream gets "group exists but is empty"
/// rather than an absent-vs-present ambiguity.
#[derive(Clone, Debug, Default)]
pub struct NamedMemberGroup {
    accessors: Vec<PropertyAccessor>,
    methods: Vec<MethodId>,
}

impl NamedMemberGroup {
    /// The property accessors collected under this name.
    pub fn accessors(&self) -> &[PropertyAccessor] {
        &self.accessors
    }

    /// The plain methods collected under this name.
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    /// Whether filtering left the group with no members.
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty() && self.methods.is_empty()
    }
}

/// Result of [`collect`]: member groups queryable by name.
#[derive(Clone, Debug, Default)]
pub struct MemberGroups {
    groups: IndexMap<Name, NamedMemberGroup>,
}

impl MemberGroups {
    /// The group for `name`, if any member or convention match produced
    /// one.
    pub fn get(&self, name: &Name) -> Option<&NamedMemberGroup> {
        self.groups.get(name)
    }

    /// Whether a group exists for `name`.
    pub fn contains(&self, name: &Name) -> bool {
        self.groups.contains_key(name)
    }

    /// All group names, in observation order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.groups.keys()
    }

    /// Iterate all groups.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &NamedMemberGroup)> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups were produced.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Scan `class` and group its members by logical name.
///
/// `static_members` selects the static vs. instance pass; a full picture
/// of a class takes one pass of each. Inherited members never contribute
/// accessors or methods (the ancestor's own pass collects those) but
/// they do force their groups to exist.
pub fn collect(
    class: &ClassDecl,
    static_members: bool,
    convention: ConventionMode,
) -> Result<MemberGroups, CollectError> {
    let mut collector = Collector {
        class,
        static_members,
        convention,
        groups: IndexMap::new(),
    };
    collector.run()?;
    Ok(MemberGroups {
        groups: collector.groups,
    })
}

struct Collector<'a> {
    class: &'a ClassDecl,
    static_members: bool,
    convention: ConventionMode,
    groups: IndexMap<Name, NamedMemberGroup>,
}

impl<'a> Collector<'a> {
    fn run(&mut self) -> Result<(), CollectError> {
        self.fields();
        self.methods()
    }

    fn group(&mut self, name: &Name) -> &mut NamedMemberGroup {
        self.groups.entry(name.clone()).or_default()
    }

    /// The inclusion filter. Enum static passes qualify any static member
    /// outright; everything else must match staticness, be declared
    /// directly on the class, and not be private.
    fn include(&self, owner: &Name, is_static: bool, private: bool) -> bool {
        if self.class.is_enum && self.static_members {
            return is_static;
        }
        if is_static != self.static_members {
            return false;
        }
        if *owner != self.class.name {
            return false;
        }
        !private
    }

    fn fields(&mut self) {
        let class = self.class;

        if self.convention == ConventionMode::Metadata && !class.is_enum {
            trace!(class = %class.name, "skipping field pass, members known from metadata");
            return;
        }

        for (id, field) in class.fields() {
            // the group must exist even for an excluded field
            self.group(&field.name);

            if !self.include(&field.owner, field.is_static, field.visibility.is_private()) {
                continue;
            }

            self.group(&field.name).accessors.push(PropertyAccessor {
                member: MemberRef::Field(id),
                kind: AccessorKind::Field,
                ty: field.ty.clone(),
                receiver: None,
            });
        }
    }

    fn methods(&mut self) -> Result<(), CollectError> {
        let class = self.class;

        // First pass, over every visible method: any name that could be a
        // method or a convention-derived property gets its group now, so
        // filtering below never makes a name disappear.
        for (_, method) in class.methods() {
            self.group(&method.name);
            if let Some(parsed) = parse_accessor_name(method.name.as_str()) {
                self.group(&parsed.property);
            }
        }

        // Second pass: only methods that survive the inclusion filter
        // contribute. The filter keeps directly declared members, except
        // that the enum static pass admits any static regardless of the
        // recorded owner (compiler-synthesized enum members carry odd
        // owners).
        for (id, method) in class.methods() {
            if !self.include(&method.owner, method.is_static, method.visibility.is_private()) {
                continue;
            }

            match parse_accessor_name(method.name.as_str()) {
                Some(parsed) if parsed.is_getter => {
                    if method.is_property {
                        self.getter(id, &parsed.property)?;
                    }
                }
                Some(parsed) => {
                    if method.is_property {
                        self.setter(id, &parsed.property)?;
                    }
                }
                None => {}
            }

            if !method.is_property {
                self.group(&method.name).methods.push(id);
            }
        }

        Ok(())
    }

    /// Record a flagged getter: optional receiver, then only
    /// type-parameter-shaped parameters may remain; the return type is the
    /// property type.
    fn getter(&mut self, id: MethodId, property: &Name) -> Result<(), CollectError> {
        let method = self.class.method(id);
        let params = &method.params;

        let mut i = 0;
        let receiver = if params.first().is_some_and(|p| p.is_receiver) {
            i = 1;
            Some(params[0].ty.clone())
        } else {
            None
        };
        while i < params.len() && params[i].is_type_param {
            i += 1;
        }
        if i != params.len() {
            return Err(CollectError::MalformedGetter {
                class: self.class.name.clone(),
                method: method.name.clone(),
            });
        }

        let ty = method
            .return_ty
            .clone()
            .ok_or_else(|| CollectError::MissingReturnType {
                class: self.class.name.clone(),
                method: method.name.clone(),
            })?;

        self.group(property).accessors.push(PropertyAccessor {
            member: MemberRef::Method(id),
            kind: AccessorKind::Getter,
            ty,
            receiver,
        });
        Ok(())
    }

    /// Record a flagged setter: optional receiver, type-parameter-shaped
    /// prefix, then exactly one value parameter carrying the property
    /// type.
    fn setter(&mut self, id: MethodId, property: &Name) -> Result<(), CollectError> {
        let method = self.class.method(id);
        let params = &method.params;

        if params.is_empty() {
            return Err(CollectError::MalformedSetter {
                class: self.class.name.clone(),
                method: method.name.clone(),
            });
        }

        let mut i = 0;
        let receiver = if params[0].is_receiver {
            i = 1;
            Some(params[0].ty.clone())
        } else {
            None
        };
        while i < params.len() && params[i].is_type_param {
            i += 1;
        }
        if i + 1 != params.len() {
            return Err(CollectError::MalformedSetter {
                class: self.class.name.clone(),
                method: method.name.clone(),
            });
        }

        let ty = params[i].ty.clone();
        self.group(property).accessors.push(PropertyAccessor {
            member: MemberRef::Method(id),
            kind: AccessorKind::Setter,
            ty,
            receiver,
        });
        Ok(())
    }
}
