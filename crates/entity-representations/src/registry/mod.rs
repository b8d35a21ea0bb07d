//! The immutable type graph the mapper walks.
//!
//! A [`TypeGraph`] mirrors the schema it was built from: a name-keyed map of
//! type definitions in which only objects and interfaces carry field sets.
//! It is constructed once by the caller and passed by reference into every
//! mapping call; nothing here mutates after construction.

mod field_types;
pub mod scalars;

pub use field_types::{FieldType, TypeSignature};

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// A schema's named types, keyed by name.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TypeGraph {
    types: BTreeMap<String, MetaType>,
}

impl TypeGraph {
    pub fn new(types: impl IntoIterator<Item = MetaType>) -> Self {
        TypeGraph {
            types: types
                .into_iter()
                .map(|ty| (ty.name().to_string(), ty))
                .collect(),
        }
    }

    pub fn lookup_type(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    /// Structural info for an object-like type.
    ///
    /// `None` for unknown names and for scalar, enum, union and input object
    /// kinds. Absence is a valid answer rather than an error: the mapper
    /// falls back to passing the value through.
    pub fn resolve_structural(&self, name: &str) -> Option<StructuralType<'_>> {
        match self.lookup_type(name)? {
            MetaType::Object(object) => Some(StructuralType {
                fields: &object.fields,
            }),
            MetaType::Interface(interface) => Some(StructuralType {
                fields: &interface.fields,
            }),
            _ => None,
        }
    }
}

/// The declared field set of an object or interface type.
#[derive(Clone, Copy, Debug)]
pub struct StructuralType<'a> {
    fields: &'a IndexMap<String, MetaField>,
}

impl<'a> StructuralType<'a> {
    /// The declared type of a field, if the type declares it.
    pub fn field(&self, name: &str) -> Option<&'a FieldType> {
        self.fields.get(name).map(|field| &field.ty)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'a MetaField> + 'a {
        self.fields.values()
    }
}

/// A named type definition.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum MetaType {
    Object(ObjectType),
    Interface(InterfaceType),
    Scalar(ScalarType),
    Enum(EnumType),
    Union(UnionType),
    InputObject(InputObjectType),
}

impl MetaType {
    pub fn name(&self) -> &str {
        match self {
            MetaType::Object(inner) => &inner.name,
            MetaType::Interface(inner) => &inner.name,
            MetaType::Scalar(inner) => &inner.name,
            MetaType::Enum(inner) => &inner.name,
            MetaType::Union(inner) => &inner.name,
            MetaType::InputObject(inner) => &inner.name,
        }
    }

    /// The declared fields, for the object-like kinds that have any.
    pub fn fields(&self) -> Option<&IndexMap<String, MetaField>> {
        match self {
            MetaType::Object(object) => Some(&object.fields),
            MetaType::Interface(interface) => Some(&interface.fields),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub fields: IndexMap<String, MetaField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaField>) -> Self {
        ObjectType {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct InterfaceType {
    pub name: String,
    pub fields: IndexMap<String, MetaField>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaField>) -> Self {
        InterfaceType {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ScalarType {
    pub name: String,
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        ScalarType { name: name.into() }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct EnumType {
    pub name: String,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        EnumType { name: name.into() }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct UnionType {
    pub name: String,
}

impl UnionType {
    pub fn new(name: impl Into<String>) -> Self {
        UnionType { name: name.into() }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct InputObjectType {
    pub name: String,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        InputObjectType { name: name.into() }
    }
}

/// A declared output field: a name and its type syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetaField {
    pub name: String,
    pub ty: FieldType,
}

impl MetaField {
    pub fn new(name: impl Into<String>, ty: impl Into<FieldType>) -> MetaField {
        MetaField {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl From<ObjectType> for MetaType {
    fn from(value: ObjectType) -> MetaType {
        MetaType::Object(value)
    }
}

impl From<InterfaceType> for MetaType {
    fn from(value: InterfaceType) -> MetaType {
        MetaType::Interface(value)
    }
}

impl From<ScalarType> for MetaType {
    fn from(value: ScalarType) -> MetaType {
        MetaType::Scalar(value)
    }
}

impl From<EnumType> for MetaType {
    fn from(value: EnumType) -> MetaType {
        MetaType::Enum(value)
    }
}

impl From<UnionType> for MetaType {
    fn from(value: UnionType) -> MetaType {
        MetaType::Union(value)
    }
}

impl From<InputObjectType> for MetaType {
    fn from(value: InputObjectType) -> MetaType {
        MetaType::InputObject(value)
    }
}
