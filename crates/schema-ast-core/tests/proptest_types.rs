use proptest::prelude::*;
use schema_ast_core::types::{
    Attribute, AttributeArgument, Block, Field, FieldType, Model, Property, Schema, Value,
};

fn ident() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,12}"
}

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        "[a-zA-Z0-9 _./:-]{0,20}".prop_map(Value::String),
        "-?[0-9]{1,6}(\\.[0-9]{1,3})?".prop_map(Value::Number),
        any::<bool>().prop_map(Value::Boolean),
        Just(Value::Null),
        ident().prop_map(Value::Identifier),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            (ident(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(name, args)| Value::Function { name, args }),
            (ident(), inner).prop_map(|(key, v)| Value::key_value(key, v)),
        ]
    })
}

proptest! {
    #[test]
    fn value_serde_roundtrip(v in value()) {
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(v, back);
    }

    #[test]
    fn field_lookup_finds_every_declared_field(
        names in prop::collection::hash_set("[a-z][a-zA-Z0-9]{0,10}", 1..8)
    ) {
        let properties: Vec<Property> = names
            .iter()
            .map(|n| Property::Field(Field::new(n.clone(), "String")))
            .collect();
        let schema = Schema::new(vec![Block::Model(Model::new("Thing", properties))]);
        let model = schema.model("Thing").unwrap();
        for n in &names {
            prop_assert!(model.field(n).is_some());
        }
        prop_assert_eq!(model.fields().count(), names.len());
    }

    #[test]
    fn attribute_serde_roundtrip(
        name in ident(),
        group in proptest::option::of(ident()),
        args in prop::collection::vec(value(), 0..3),
    ) {
        let mut attr = Attribute::field(name)
            .with_args(args.into_iter().map(AttributeArgument::Value).collect());
        attr.group = group;
        let field = Field {
            name: "f".into(),
            field_type: FieldType::Identifier("Int".into()),
            array: false,
            optional: true,
            attributes: vec![attr],
        };
        let json = serde_json::to_string(&field).unwrap();
        let back: Field = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(field, back);
    }
}
