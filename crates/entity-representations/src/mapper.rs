//! Schema-aware mapping of `_Any` entity representations.
//!
//! The router sends entity references as plain JSON, bypassing the
//! per-argument input coercion a regular query goes through. The mapper walks
//! a representation in lock-step with the declared type signatures and runs
//! every custom-scalar field through its registered parser, recursing into
//! nested object-like fields. Anything the schema or registry doesn't know is
//! passed through untouched.

use serde_json::{Map, Value};

use crate::{
    registry::{scalars::ScalarRegistry, StructuralType, TypeGraph, TypeSignature},
    MappingError,
};

/// Reserved field naming the concrete type of a representation.
pub const TYPENAME_FIELD: &str = "__typename";

/// The `_Any` scalar boundary: one mapper per type graph and scalar registry
/// pair.
///
/// Holds only borrows. Both collaborators are read-only, so a graph and a
/// registry can back any number of mappers and concurrent calls, provided the
/// registered parsers are reentrant.
#[derive(Clone, Copy)]
pub struct EntityMapper<'a> {
    graph: &'a TypeGraph,
    scalars: &'a ScalarRegistry,
}

/// Maps one entity representation; see [`EntityMapper::parse_value`].
pub fn map_entity(
    value: &Value,
    graph: &TypeGraph,
    scalars: &ScalarRegistry,
) -> Result<Value, MappingError> {
    EntityMapper::new(graph, scalars).parse_value(value)
}

impl<'a> EntityMapper<'a> {
    pub fn new(graph: &'a TypeGraph, scalars: &'a ScalarRegistry) -> Self {
        EntityMapper { graph, scalars }
    }

    /// Maps one entity representation, returning a new value.
    ///
    /// Non-object roots and objects of types the graph has no structural info
    /// for come back unchanged; this is best-effort enrichment, not
    /// validation. An object root without a string `__typename` is an error,
    /// as the router always provides one. Any error aborts the whole call.
    pub fn parse_value(&self, value: &Value) -> Result<Value, MappingError> {
        let Some(object) = value.as_object() else {
            return Ok(value.clone());
        };

        let type_name = match object.get(TYPENAME_FIELD) {
            Some(Value::String(name)) => name,
            _ => {
                return Err(MappingError::MissingTypeDiscriminator {
                    value: value.clone(),
                })
            }
        };

        let Some(structural) = self.graph.resolve_structural(type_name) else {
            tracing::debug!("no structural type for {type_name}, representation passed through");
            return Ok(value.clone());
        };

        self.map_object(object, structural).map(Value::Object)
    }

    /// `_Any`'s result coercion is the identity: representations leave as the
    /// JSON they already are.
    pub fn serialize(&self, value: Value) -> Value {
        value
    }

    /// Fields the type declares go through their signature; everything else
    /// is copied verbatim. Declared fields absent from the value are not
    /// synthesized.
    fn map_object(
        &self,
        object: &Map<String, Value>,
        structural: StructuralType<'_>,
    ) -> Result<Map<String, Value>, MappingError> {
        let mut mapped = Map::new();
        for (key, field_value) in object {
            let value = match structural.field(key) {
                Some(ty) => self.map_field(key, &ty.signature(), field_value)?,
                None => field_value.clone(),
            };
            mapped.insert(key.clone(), value);
        }
        Ok(mapped)
    }

    fn map_field(
        &self,
        field: &str,
        signature: &TypeSignature<'_>,
        value: &Value,
    ) -> Result<Value, MappingError> {
        match signature {
            TypeSignature::Named(type_name) => {
                if value.is_null() {
                    return Ok(Value::Null);
                }
                self.map_named(field, type_name, value)
            }
            TypeSignature::NonNull(inner) => match inner.as_ref() {
                TypeSignature::Named(type_name) => {
                    if value.is_null() {
                        return Err(MappingError::NonNullViolation {
                            field: field.to_string(),
                            ty: (*type_name).to_string(),
                        });
                    }
                    self.map_named(field, type_name, value)
                }
                TypeSignature::List(element) => self.map_list(field, element, value),
                // `NonNull` directly inside `NonNull` is not well-formed type
                // syntax; leave the value alone.
                TypeSignature::NonNull(_) => Ok(value.clone()),
            },
            TypeSignature::List(element) => self.map_list(field, element, value),
        }
    }

    fn map_list(
        &self,
        field: &str,
        element: &TypeSignature<'_>,
        value: &Value,
    ) -> Result<Value, MappingError> {
        // Shape mismatches are tolerated; strict validation happens elsewhere
        // in the request pipeline.
        let Some(elements) = value.as_array() else {
            tracing::debug!("list-typed field {field} holds a non-array value, passed through");
            return Ok(value.clone());
        };

        elements
            .iter()
            .map(|element_value| self.map_field(field, element, element_value))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Leaf resolution for a named, non-null-checked position: a registered
    /// scalar parser wins, then structural recursion, then pass-through.
    fn map_named(
        &self,
        field: &str,
        type_name: &str,
        value: &Value,
    ) -> Result<Value, MappingError> {
        if let Some(parser) = self.scalars.parser(type_name) {
            return parser
                .parse(value.clone())
                .map_err(|source| MappingError::ScalarParse {
                    type_name: type_name.to_string(),
                    field: field.to_string(),
                    source,
                });
        }

        let Some(object) = value.as_object() else {
            return Ok(value.clone());
        };

        // A representation may be more concrete than the declared field type
        // (interface fields): its own __typename wins whenever the graph
        // knows it, otherwise the declared type is used.
        let structural = object
            .get(TYPENAME_FIELD)
            .and_then(Value::as_str)
            .and_then(|concrete| self.graph.resolve_structural(concrete))
            .or_else(|| self.graph.resolve_structural(type_name));

        match structural {
            Some(structural) => self.map_object(object, structural).map(Value::Object),
            None => Ok(value.clone()),
        }
    }
}
