//! Schema-aware conversion of federated entity representations.
//!
//! When a subgraph resolves the federation `_entities` field, the router hands
//! it `_Any` representations: JSON objects carrying a `__typename` plus the
//! entity's key fields. Those values bypass the input coercion a regular query
//! argument goes through, so custom scalars (dates, encoded enums, ...) arrive
//! in their wire form. This crate re-applies the coercion: [`EntityMapper`]
//! walks a representation in lock-step with an immutable [`TypeGraph`] and
//! runs every field declared as a registered custom scalar through that
//! scalar's parser, returning a new, deeply-converted value.
//!
//! Mapping is best-effort enrichment, not validation. Unknown types, unknown
//! fields and shape mismatches pass through untouched; only a missing root
//! `__typename`, a null in a non-null position or a parser rejection fail the
//! call, each as a distinct [`MappingError`] variant.
//!
//! The whole computation is synchronous and pure. A [`TypeGraph`] and a
//! [`registry::scalars::ScalarRegistry`] are read-only once built and can be
//! shared across threads; recursion depth is bounded by the schema, which is
//! assumed shallow enough not to need an explicit guard.
//!
//! See the Apollo subgraph spec for the `_Any` scalar this implements:
//! <https://www.apollographql.com/docs/federation/subgraph-spec/#scalar-_any>

mod error;
mod mapper;
pub mod registry;

pub use error::{MappingError, ScalarParseError};
pub use mapper::{map_entity, EntityMapper, TYPENAME_FIELD};
pub use registry::{
    EnumType, FieldType, InputObjectType, InterfaceType, MetaField, MetaType, ObjectType,
    ScalarType, StructuralType, TypeGraph, TypeSignature, UnionType,
};
