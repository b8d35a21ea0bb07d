//! End-to-end mapping scenarios over a small subgraph-like schema.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use entity_representations::{
    map_entity,
    registry::scalars::{DateScalar, ScalarParser, ScalarRegistry, UserRoleScalar},
    EntityMapper, InterfaceType, MappingError, MetaField, ObjectType, ScalarParseError,
    ScalarType, TypeGraph,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

fn schema() -> TypeGraph {
    TypeGraph::new([
        ObjectType::new(
            "User",
            [
                MetaField::new("id", "ID!"),
                MetaField::new("userRole", "UserRole"),
                MetaField::new("joinDate", "Date"),
                MetaField::new("purchaseDates", "[Date]!"),
                MetaField::new("referredBy", "User"),
                MetaField::new("pet", "Pet"),
            ],
        )
        .into(),
        ObjectType::new(
            "Product",
            [
                MetaField::new("id", "ID!"),
                MetaField::new("name", "String!"),
                MetaField::new("price", "String!"),
            ],
        )
        .into(),
        InterfaceType::new(
            "Pet",
            [MetaField::new("name", "String!"), MetaField::new("since", "Date")],
        )
        .into(),
        ObjectType::new(
            "Dog",
            [
                MetaField::new("name", "String!"),
                MetaField::new("since", "Date"),
                MetaField::new("lastWalk", "Date"),
            ],
        )
        .into(),
        ScalarType::new("Date").into(),
        ScalarType::new("UserRole").into(),
        ScalarType::new("JSON").into(),
    ])
}

fn scalars() -> ScalarRegistry {
    ScalarRegistry::new()
        .register("Date", DateScalar)
        .register("UserRole", UserRoleScalar)
        .register_opaque("JSON")
}

#[test]
fn converts_custom_scalars_in_a_representation() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "userRole": 1,
        "joinDate": "2024-01-01T05:00:00.000Z",
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(
        mapped,
        json!({
            "__typename": "User",
            "id": "123",
            "userRole": "user",
            "joinDate": "2024-01-01T05:00:00.000Z",
        })
    );
}

#[test]
fn nullable_scalar_fields_accept_null() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "joinDate": null,
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(mapped["joinDate"], Value::Null);
}

#[test]
fn null_fields_never_reach_the_parser() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = ScalarRegistry::new().register(
        "Date",
        CountingScalar {
            calls: calls.clone(),
        },
    );

    let representation = json!({
        "__typename": "User",
        "id": "123",
        "joinDate": null,
    });

    map_entity(&representation, &schema(), &registry).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let representation = json!({
        "__typename": "User",
        "id": "123",
        "joinDate": "2024-01-01T05:00:00.000Z",
    });

    map_entity(&representation, &schema(), &registry).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn non_null_field_rejects_null() {
    let graph = TypeGraph::new([
        ObjectType::new(
            "User",
            [MetaField::new("id", "ID!"), MetaField::new("userRole", "UserRole!")],
        )
        .into(),
        ScalarType::new("UserRole").into(),
    ]);

    let representation = json!({
        "__typename": "User",
        "id": "123",
        "userRole": null,
    });

    let err = map_entity(&representation, &graph, &scalars()).unwrap_err();

    assert_eq!(
        err,
        MappingError::NonNullViolation {
            field: "userRole".to_string(),
            ty: "UserRole".to_string(),
        }
    );
}

#[test]
fn parser_rejections_surface_with_field_context() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "joinDate": "not valid date",
    });

    let err = map_entity(&representation, &schema(), &scalars()).unwrap_err();

    match &err {
        MappingError::ScalarParse {
            type_name, field, ..
        } => {
            assert_eq!(type_name, "Date");
            assert_eq!(field, "joinDate");
        }
        other => panic!("expected a scalar parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("joinDate"));
}

#[test]
fn maps_list_elements_in_order() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "purchaseDates": [
            "2024-01-01T05:00:00.000Z",
            "2023-01-01T06:00:00.000+01:00",
        ],
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(
        mapped["purchaseDates"],
        json!(["2024-01-01T05:00:00.000Z", "2023-01-01T05:00:00.000Z"])
    );
}

#[test]
fn maps_nested_lists_element_by_element() {
    let graph = TypeGraph::new([
        ObjectType::new("Report", [
            MetaField::new("id", "ID!"),
            MetaField::new("dateMatrix", "[[Date!]]"),
        ])
        .into(),
        ScalarType::new("Date").into(),
    ]);

    let representation = json!({
        "__typename": "Report",
        "id": "r1",
        "dateMatrix": [
            ["2024-01-01T05:00:00.000Z"],
            ["2023-01-01T06:00:00.000+01:00", "2022-01-01T00:00:00.000Z"],
        ],
    });

    let mapped = map_entity(&representation, &graph, &scalars()).unwrap();

    assert_eq!(
        mapped["dateMatrix"],
        json!([
            ["2024-01-01T05:00:00.000Z"],
            ["2023-01-01T05:00:00.000Z", "2022-01-01T00:00:00.000Z"],
        ])
    );
}

#[rstest]
#[case(json!(null))]
#[case(json!("plain string"))]
#[case(json!(42))]
#[case(json!(["2024-01-01T05:00:00.000Z"]))]
fn non_object_roots_pass_through(#[case] representation: Value) {
    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();
    assert_eq!(mapped, representation);
}

#[rstest]
#[case(json!({"id": "123"}))]
#[case(json!({"__typename": 42, "id": "123"}))]
#[case(json!({"__typename": null, "id": "123"}))]
fn object_roots_require_a_string_typename(#[case] representation: Value) {
    let err = map_entity(&representation, &schema(), &scalars()).unwrap_err();

    assert!(matches!(err, MappingError::MissingTypeDiscriminator { .. }));
    // The offending value must be part of the diagnostics.
    assert!(err.to_string().contains("123"));
}

#[test]
fn unknown_root_types_pass_through() {
    let representation = json!({
        "__typename": "Ghost",
        "joinDate": "2024-01-01T05:00:00.000Z",
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();
    assert_eq!(mapped, representation);
}

#[test]
fn representation_without_registered_scalars_maps_to_itself() {
    let representation = json!({
        "__typename": "Product",
        "id": "p-1",
        "name": "Cool Product",
        "price": "$5.00",
        "unknownField": {"anything": [1, 2, 3]},
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();
    assert_eq!(mapped, representation);
}

#[test]
fn opaque_scalars_pass_through_unparsed() {
    let graph = TypeGraph::new([
        ObjectType::new("User", [
            MetaField::new("id", "ID!"),
            MetaField::new("settings", "JSON"),
        ])
        .into(),
        ScalarType::new("JSON").into(),
    ]);

    let representation = json!({
        "__typename": "User",
        "id": "123",
        "settings": {"theme": "dark", "limits": [1, 2]},
    });

    let mapped = map_entity(&representation, &graph, &scalars()).unwrap();
    assert_eq!(mapped, representation);
}

#[test]
fn list_shaped_mismatch_is_tolerated() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "purchaseDates": "2024-01-01T05:00:00.000Z",
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    // Declared as a list but the value isn't one: left alone, not parsed.
    assert_eq!(mapped["purchaseDates"], json!("2024-01-01T05:00:00.000Z"));
}

#[test]
fn recurses_into_nested_objects_without_their_own_typename() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "referredBy": {
            "id": "456",
            "userRole": 2,
            "joinDate": "2020-05-01T00:00:00.000Z",
        },
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(
        mapped["referredBy"],
        json!({
            "id": "456",
            "userRole": "admin",
            "joinDate": "2020-05-01T00:00:00.000Z",
        })
    );
}

#[test]
fn interface_fields_prefer_the_value_typename() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "pet": {
            "__typename": "Dog",
            "name": "Rex",
            "since": "2022-03-01T00:00:00.000Z",
            // Declared on Dog only, not on the Pet interface.
            "lastWalk": "2024-01-01T07:30:00.000+00:00",
        },
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(
        mapped["pet"],
        json!({
            "__typename": "Dog",
            "name": "Rex",
            "since": "2022-03-01T00:00:00.000Z",
            "lastWalk": "2024-01-01T07:30:00.000Z",
        })
    );
}

#[test]
fn unresolvable_value_typename_falls_back_to_the_declared_type() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "pet": {
            "__typename": "Cat",
            "name": "Mia",
            "since": "2021-07-01T02:00:00.000+02:00",
        },
    });

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    // "Cat" is unknown to the graph, so the declared Pet interface applies.
    assert_eq!(
        mapped["pet"],
        json!({
            "__typename": "Cat",
            "name": "Mia",
            "since": "2021-07-01T00:00:00.000Z",
        })
    );
}

#[test]
fn input_is_not_mutated() {
    let representation = json!({
        "__typename": "User",
        "id": "123",
        "userRole": 1,
    });
    let before = representation.clone();

    let mapped = map_entity(&representation, &schema(), &scalars()).unwrap();

    assert_eq!(representation, before);
    assert_ne!(mapped, representation);
}

#[test]
fn mapper_serialize_is_the_identity() {
    let graph = schema();
    let registry = scalars();
    let mapper = EntityMapper::new(&graph, &registry);

    let value = json!({"__typename": "User", "userRole": "user"});
    assert_eq!(mapper.serialize(value.clone()), value);
}

struct CountingScalar {
    calls: Arc<AtomicUsize>,
}

impl ScalarParser for CountingScalar {
    fn parse(&self, value: Value) -> Result<Value, ScalarParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    fn serialize(&self, value: Value) -> Result<Value, ScalarParseError> {
        Ok(value)
    }
}
