//! End-to-end tests for member grouping over a realistic class.

use rstest::rstest;

use lumen_resolve::base::{Name, synthetic_range};
use lumen_resolve::members::{
    AccessorKind, ClassDecl, CollectError, ConventionMode, FieldDecl, MemberGroups, MethodDecl,
    ParamDecl, TypeRef, Visibility, collect,
};

fn field(name: &str, ty: &str, owner: &str, is_static: bool, visibility: Visibility) -> FieldDecl {
    FieldDecl {
        name: Name::new(name),
        ty: TypeRef::new(ty),
        owner: Name::new(owner),
        is_static,
        visibility,
        span: synthetic_range(),
    }
}

fn method(name: &str, owner: &str) -> MethodDecl {
    MethodDecl {
        name: Name::new(name),
        return_ty: Some(TypeRef::new("Unit")),
        params: Vec::new(),
        owner: Name::new(owner),
        is_static: false,
        visibility: Visibility::Public,
        is_property: false,
        span: synthetic_range(),
    }
}

/// A `Sensor` class with an inherited base, fields, flagged accessors,
/// a static factory, and a private helper.
fn sensor_class() -> ClassDecl {
    let mut class = ClassDecl::new("Sensor", false);

    class.push_field(field("id", "String", "Sensor", false, Visibility::Public));
    class.push_field(field("label", "String", "Device", false, Visibility::Public));
    class.push_field(field("seq", "Int", "Sensor", true, Visibility::Public));
    class.push_field(field("raw", "Bytes", "Sensor", false, Visibility::Private));

    let mut getter = method("getReading", "Sensor");
    getter.return_ty = Some(TypeRef::new("Reading"));
    getter.is_property = true;
    class.push_method(getter);

    let mut setter = method("setThreshold", "Sensor");
    setter.is_property = true;
    setter.params = vec![ParamDecl::plain("value", "Float")];
    class.push_method(setter);

    let mut factory = method("create", "Sensor");
    factory.is_static = true;
    class.push_method(factory);

    let mut helper = method("recalibrate", "Sensor");
    helper.visibility = Visibility::Private;
    class.push_method(helper);

    class.push_method(method("toString", "Any"));

    class
}

fn instance_groups() -> MemberGroups {
    collect(&sensor_class(), false, ConventionMode::Declarations).unwrap()
}

#[test]
fn test_every_observed_name_has_a_group() {
    let groups = instance_groups();

    for name in [
        "id", "label", "seq", "raw", // fields, inherited and filtered included
        "getReading", "reading", // accessor and its property name
        "setThreshold", "threshold", "create", "recalibrate", "toString",
    ] {
        assert!(groups.contains(&Name::new(name)), "missing group for {name}");
    }
}

#[test]
fn test_instance_pass_contents() {
    let groups = instance_groups();

    // own public field
    let id = groups.get(&Name::new("id")).unwrap();
    assert_eq!(id.accessors().len(), 1);
    assert_eq!(id.accessors()[0].kind, AccessorKind::Field);

    // inherited, static, and private members leave empty groups
    for name in ["label", "seq", "raw", "recalibrate", "toString"] {
        assert!(
            groups.get(&Name::new(name)).unwrap().is_empty(),
            "{name} should have been filtered"
        );
    }

    // flagged accessors land under their property names
    let reading = groups.get(&Name::new("reading")).unwrap();
    assert_eq!(reading.accessors()[0].kind, AccessorKind::Getter);
    assert_eq!(reading.accessors()[0].ty.as_str(), "Reading");

    let threshold = groups.get(&Name::new("threshold")).unwrap();
    assert_eq!(threshold.accessors()[0].kind, AccessorKind::Setter);
    assert_eq!(threshold.accessors()[0].ty.as_str(), "Float");

    // the accessors are not also plain methods
    assert!(groups.get(&Name::new("getReading")).unwrap().methods().is_empty());
    assert!(groups.get(&Name::new("setThreshold")).unwrap().methods().is_empty());
}

#[test]
fn test_static_pass_picks_up_the_factory() {
    let groups = collect(&sensor_class(), true, ConventionMode::Declarations).unwrap();

    assert_eq!(groups.get(&Name::new("create")).unwrap().methods().len(), 1);
    assert!(groups.get(&Name::new("id")).unwrap().is_empty());
}

#[rstest]
#[case::getter_with_argument(true, vec![ParamDecl::plain("units", "Unit")], true)]
#[case::getter_clean(true, vec![], false)]
#[case::getter_receiver_only(true, vec![ParamDecl::receiver("Sensor")], false)]
#[case::setter_no_argument(false, vec![], true)]
#[case::setter_one_argument(false, vec![ParamDecl::plain("value", "Float")], false)]
#[case::setter_receiver_only(false, vec![ParamDecl::receiver("Sensor")], true)]
#[case::setter_receiver_and_value(
    false,
    vec![ParamDecl::receiver("Sensor"), ParamDecl::plain("value", "Float")],
    false
)]
fn test_accessor_shape_boundaries(
    #[case] is_getter: bool,
    #[case] params: Vec<ParamDecl>,
    #[case] expect_error: bool,
) {
    let mut class = ClassDecl::new("Sensor", false);
    let mut m = method(if is_getter { "getLevel" } else { "setLevel" }, "Sensor");
    m.return_ty = Some(TypeRef::new("Float"));
    m.is_property = true;
    m.params = params;
    class.push_method(m);

    let result = collect(&class, false, ConventionMode::Declarations);
    if expect_error {
        assert!(matches!(
            result.unwrap_err(),
            CollectError::MalformedGetter { .. } | CollectError::MalformedSetter { .. }
        ));
    } else {
        let groups = result.unwrap();
        let group = groups.get(&Name::new("level")).unwrap();
        assert_eq!(group.accessors().len(), 1);
        assert_eq!(group.accessors()[0].ty.as_str(), "Float");
    }
}

#[test]
fn test_enum_statics_survive_foreign_ownership() {
    let mut class = ClassDecl::new("Mode", true);
    class.push_field(field("AUTO", "Mode", "Mode", true, Visibility::Public));

    let mut values = method("values", "Enum");
    values.is_static = true;
    class.push_method(values);

    let groups = collect(&class, true, ConventionMode::Declarations).unwrap();

    assert_eq!(groups.get(&Name::new("AUTO")).unwrap().accessors().len(), 1);
    assert_eq!(groups.get(&Name::new("values")).unwrap().methods().len(), 1);
}
