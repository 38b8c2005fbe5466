use prost::Message;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet,
    field_descriptor_proto::{Label, Type},
};
use proto2args_schema::{DescriptorPool, FieldType, SchemaError};

fn file(package: Option<&str>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("test.proto".to_string()),
        package: package.map(str::to_string),
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

fn scalar_field(name: &str, number: i32, typ: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(typ.into()),
        label: Some(Label::Optional.into()),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(Type::Message.into()),
        type_name: Some(type_name.to_string()),
        label: Some(Label::Optional.into()),
        ..Default::default()
    }
}

fn pool_from(file: FileDescriptorProto) -> DescriptorPool {
    DescriptorPool::from_descriptor_set(&FileDescriptorSet { file: vec![file] })
}

#[test]
fn registers_messages_under_package() {
    let mut f = file(Some("trace.pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Event".to_string()),
        field: vec![scalar_field("x", 1, Type::Int32)],
        ..Default::default()
    });
    let pool = pool_from(f);

    let event = pool.find_message("trace.pkg.Event").unwrap();
    assert_eq!(event.full_name(), "trace.pkg.Event");
    // protoc-style absolute references carry a leading dot.
    assert!(pool.find_message(".trace.pkg.Event").is_some());
    assert!(pool.find_message("Event").is_none());

    let x = event.find_field_by_tag(1).unwrap();
    assert_eq!(x.name(), "x");
    assert_eq!(x.tag(), 1);
    assert_eq!(x.field_type(), FieldType::Int32);
    assert!(!x.is_repeated());
    assert!(!x.is_extension());
    assert!(x.resolved_type_name().is_none());
    assert!(event.find_field_by_tag(99).is_none());
}

#[test]
fn nested_types_register_under_parent() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Outer".to_string()),
        nested_type: vec![DescriptorProto {
            name: Some("Inner".to_string()),
            field: vec![scalar_field("y", 1, Type::Bool)],
            ..Default::default()
        }],
        enum_type: vec![EnumDescriptorProto {
            name: Some("State".to_string()),
            value: vec![EnumValueDescriptorProto {
                name: Some("IDLE".to_string()),
                number: Some(0),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    });
    let pool = pool_from(f);

    assert!(pool.find_message("pkg.Outer").is_some());
    assert!(pool.find_message("pkg.Outer.Inner").is_some());
    assert_eq!(
        pool.find_enum("pkg.Outer.State").unwrap().find_name(0),
        Some("IDLE")
    );
}

#[test]
fn absolute_references_resolve_exactly() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Inner".to_string()),
        ..Default::default()
    });
    f.message_type.push(DescriptorProto {
        name: Some("Outer".to_string()),
        field: vec![message_field("inner", 1, ".pkg.Inner")],
        ..Default::default()
    });
    let pool = pool_from(f);

    let inner = pool
        .find_message("pkg.Outer")
        .unwrap()
        .find_field_by_tag(1)
        .unwrap();
    assert_eq!(inner.resolved_type_name(), Some("pkg.Inner"));
}

#[test]
fn relative_reference_resolves_by_unique_suffix() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Outer".to_string()),
        field: vec![message_field("inner", 1, "Inner")],
        nested_type: vec![DescriptorProto {
            name: Some("Inner".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    });
    let pool = pool_from(f);

    let inner = pool
        .find_message("pkg.Outer")
        .unwrap()
        .find_field_by_tag(1)
        .unwrap();
    assert_eq!(inner.resolved_type_name(), Some("pkg.Outer.Inner"));
}

#[test]
fn ambiguous_suffix_is_kept_verbatim() {
    let mut f = file(Some("pkg"));
    for parent in ["A", "B"] {
        f.message_type.push(DescriptorProto {
            name: Some(parent.to_string()),
            nested_type: vec![DescriptorProto {
                name: Some("Inner".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });
    }
    f.message_type.push(DescriptorProto {
        name: Some("Holder".to_string()),
        field: vec![message_field("inner", 1, "Inner")],
        ..Default::default()
    });
    let pool = pool_from(f);

    let inner = pool
        .find_message("pkg.Holder")
        .unwrap()
        .find_field_by_tag(1)
        .unwrap();
    assert_eq!(inner.resolved_type_name(), Some("Inner"));
    assert!(pool.find_message("Inner").is_none());
}

#[test]
fn file_level_extension_attaches_to_extendee() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Event".to_string()),
        field: vec![scalar_field("x", 1, Type::Int32)],
        ..Default::default()
    });
    f.extension.push(FieldDescriptorProto {
        name: Some("ext_flag".to_string()),
        number: Some(100),
        r#type: Some(Type::Bool.into()),
        label: Some(Label::Optional.into()),
        extendee: Some(".pkg.Event".to_string()),
        ..Default::default()
    });
    let pool = pool_from(f);

    let ext = pool
        .find_message("pkg.Event")
        .unwrap()
        .find_field_by_tag(100)
        .unwrap();
    assert_eq!(ext.name(), "ext_flag");
    assert!(ext.is_extension());
    assert_eq!(ext.field_type(), FieldType::Bool);
}

#[test]
fn message_scoped_extension_attaches_to_extendee() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Event".to_string()),
        ..Default::default()
    });
    f.message_type.push(DescriptorProto {
        name: Some("Extensions".to_string()),
        extension: vec![FieldDescriptorProto {
            name: Some("label".to_string()),
            number: Some(200),
            r#type: Some(Type::String.into()),
            label: Some(Label::Optional.into()),
            extendee: Some(".pkg.Event".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    });
    let pool = pool_from(f);

    let ext = pool
        .find_message("pkg.Event")
        .unwrap()
        .find_field_by_tag(200)
        .unwrap();
    assert!(ext.is_extension());
    assert_eq!(ext.name(), "label");
}

#[test]
fn enum_alias_keeps_first_declared_name() {
    let mut f = file(None);
    f.enum_type.push(EnumDescriptorProto {
        name: Some("Mode".to_string()),
        value: [("OFF", 0), ("ON", 1), ("ENABLED", 1)]
            .iter()
            .map(|(name, number)| EnumValueDescriptorProto {
                name: Some(name.to_string()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    });
    let pool = pool_from(f);

    let mode = pool.find_enum("Mode").unwrap();
    assert_eq!(mode.find_name(0), Some("OFF"));
    assert_eq!(mode.find_name(1), Some("ON"));
    assert_eq!(mode.find_name(7), None);
}

#[test]
fn repeated_label_is_reflected() {
    let mut f = file(None);
    f.message_type.push(DescriptorProto {
        name: Some("M".to_string()),
        field: vec![FieldDescriptorProto {
            name: Some("items".to_string()),
            number: Some(1),
            r#type: Some(Type::String.into()),
            label: Some(Label::Repeated.into()),
            ..Default::default()
        }],
        ..Default::default()
    });
    let pool = pool_from(f);

    assert!(
        pool.find_message("M")
            .unwrap()
            .find_field_by_tag(1)
            .unwrap()
            .is_repeated()
    );
}

#[test]
fn roundtrips_through_serialized_bytes() {
    let mut f = file(Some("pkg"));
    f.message_type.push(DescriptorProto {
        name: Some("Event".to_string()),
        field: vec![scalar_field("x", 1, Type::Int64)],
        ..Default::default()
    });
    let bytes = FileDescriptorSet { file: vec![f] }.encode_to_vec();

    let pool = DescriptorPool::from_descriptor_set_bytes(&bytes).unwrap();
    assert!(pool.find_message("pkg.Event").is_some());
}

#[test]
fn invalid_bytes_are_rejected() {
    let err = DescriptorPool::from_descriptor_set_bytes(&[0xff, 0xff]).unwrap_err();
    assert!(matches!(err, SchemaError::DescriptorSetDecode { .. }));
}
