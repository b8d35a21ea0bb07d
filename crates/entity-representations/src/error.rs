use serde_json::Value;

/// Error returned by a scalar parser that rejected a wire value.
///
/// Carries the parser's own human-readable reason; the mapper wraps it with
/// field and type context before surfacing it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ScalarParseError {
    message: String,
}

impl ScalarParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fatal errors from mapping an entity representation.
///
/// Any of these aborts the whole call; there are no partial results. The
/// variants are distinct so a gateway layer can decide per kind whether to
/// log, retry elsewhere or fail the request.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MappingError {
    /// The root representation is an object without a usable `__typename`.
    #[error("could not parse out type for {value}, missing __typename")]
    MissingTypeDiscriminator { value: Value },

    /// A field declared non-null held a null value.
    #[error("non-null field {field} of type {ty} cannot be null")]
    NonNullViolation { field: String, ty: String },

    /// The registered parser for a custom scalar rejected the field's value.
    #[error("invalid value for field {field} of scalar type {type_name}: {source}")]
    ScalarParse {
        type_name: String,
        field: String,
        #[source]
        source: ScalarParseError,
    },
}
