//! Field type syntax and the signature tree it parses into.

use std::fmt;

/// A declared field type in its compact GraphQL syntax, e.g. `Date`, `Date!`,
/// `[Date!]!`.
///
/// Stored exactly as written in the schema and parsed into a
/// [`TypeSignature`] on demand, which keeps the type graph cheap to build and
/// serialize.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FieldType(String);

impl FieldType {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The named type with all list and non-null wrappers stripped.
    pub fn named_type(&self) -> &str {
        self.signature().named_type()
    }

    /// Parses the syntax into the three-variant signature tree.
    pub fn signature(&self) -> TypeSignature<'_> {
        TypeSignature::parse(&self.0)
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> FieldType {
        FieldType(value.to_string())
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> FieldType {
        FieldType(value)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The nullability and list structure of a declared field type.
///
/// In well-formed syntax `NonNull` never directly wraps another `NonNull`;
/// `List` may wrap anything, including another `List`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSignature<'a> {
    Named(&'a str),
    NonNull(Box<TypeSignature<'a>>),
    List(Box<TypeSignature<'a>>),
}

impl<'a> TypeSignature<'a> {
    /// Wrappers bind from the outside in: a trailing `!` first, then one
    /// bracket pair. Anything that doesn't match either is a named type;
    /// malformed syntax therefore degrades to `Named` of the remainder rather
    /// than failing, and the mapper passes such fields through.
    fn parse(ty: &'a str) -> Self {
        let ty = ty.trim();
        if let Some(inner) = ty.strip_suffix('!') {
            TypeSignature::NonNull(Box::new(TypeSignature::parse(inner)))
        } else if let Some(inner) = ty.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            TypeSignature::List(Box::new(TypeSignature::parse(inner)))
        } else {
            TypeSignature::Named(ty)
        }
    }

    /// The named type at the bottom of the wrapper stack.
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeSignature::Named(name) => name,
            TypeSignature::NonNull(inner) | TypeSignature::List(inner) => inner.named_type(),
        }
    }
}
