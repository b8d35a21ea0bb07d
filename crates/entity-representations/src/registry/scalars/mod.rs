//! Custom scalar parsers and the registry the mapper consults.

mod date;
mod user_role;

pub use date::DateScalar;
pub use user_role::{UserRole, UserRoleScalar};

use std::collections::BTreeMap;

use serde_json::Value;

use crate::ScalarParseError;

/// Conversion capability for one custom scalar.
///
/// `parse` applies input coercion to a wire value; `serialize` renders a
/// parsed value back into wire form. Implementations must be reentrant: a
/// single registry may back any number of concurrent mapping calls.
pub trait ScalarParser: Send + Sync {
    fn parse(&self, value: Value) -> Result<Value, ScalarParseError>;

    fn serialize(&self, value: Value) -> Result<Value, ScalarParseError>;
}

/// Scalar-type-name to parser registry.
///
/// Whether a name participates in conversion is fixed when the entry is
/// registered; the mapper never re-inspects entries per call. Names
/// registered as opaque, like names never registered at all, pass their
/// values through untouched.
#[derive(Default)]
pub struct ScalarRegistry {
    entries: BTreeMap<String, ScalarEntry>,
}

enum ScalarEntry {
    Parser(Box<dyn ScalarParser>),
    Opaque,
}

impl ScalarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: impl Into<String>, parser: impl ScalarParser + 'static) -> Self {
        self.entries
            .insert(name.into(), ScalarEntry::Parser(Box::new(parser)));
        self
    }

    /// Registers a scalar that is known but deliberately left unconverted.
    pub fn register_opaque(mut self, name: impl Into<String>) -> Self {
        self.entries.insert(name.into(), ScalarEntry::Opaque);
        self
    }

    /// The parser for a scalar name, if one was registered with the parse
    /// capability.
    pub fn parser(&self, name: &str) -> Option<&dyn ScalarParser> {
        match self.entries.get(name)? {
            ScalarEntry::Parser(parser) => Some(parser.as_ref()),
            ScalarEntry::Opaque => None,
        }
    }
}

impl std::fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, entry) in &self.entries {
            map.entry(name, match entry {
                ScalarEntry::Parser(_) => &"Parser",
                ScalarEntry::Opaque => &"Opaque",
            });
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_entries_have_no_parser() {
        let registry = ScalarRegistry::new()
            .register("Date", DateScalar)
            .register_opaque("JSON");

        assert!(registry.parser("Date").is_some());
        assert!(registry.parser("JSON").is_none());
        assert!(registry.parser("Unknown").is_none());
    }
}
