use serde_json::Value;

use super::ScalarParser;
use crate::ScalarParseError;

/// A role as resolvers see it, after coercion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Guest => "guest",
        }
    }

    fn from_name(role: &str) -> Option<UserRole> {
        match role {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            "guest" => Some(UserRole::Guest),
            _ => None,
        }
    }

    /// Numeric encoding kept for services that predate the scalar.
    fn from_code(code: u64) -> Option<UserRole> {
        match code {
            2 => Some(UserRole::Admin),
            1 => Some(UserRole::User),
            0 => Some(UserRole::Guest),
            _ => None,
        }
    }
}

/// Role scalar accepting role strings and legacy numeric codes on input,
/// always producing role strings on output.
pub struct UserRoleScalar;

impl UserRoleScalar {
    pub fn parse_value(value: Value) -> Result<UserRole, ScalarParseError> {
        match value {
            Value::String(role) => UserRole::from_name(&role)
                .ok_or_else(|| ScalarParseError::new(format!("unrecognized user role {role:?}"))),
            Value::Number(number) => number
                .as_u64()
                .and_then(UserRole::from_code)
                .ok_or_else(|| {
                    ScalarParseError::new(format!("unrecognized user role code {number}"))
                }),
            other => Err(ScalarParseError::new(format!(
                "invalid value when parsing user role: {other}"
            ))),
        }
    }
}

impl ScalarParser for UserRoleScalar {
    fn parse(&self, value: Value) -> Result<Value, ScalarParseError> {
        UserRoleScalar::parse_value(value).map(|role| Value::String(role.as_str().to_string()))
    }

    fn serialize(&self, value: Value) -> Result<Value, ScalarParseError> {
        match value {
            Value::String(role) if UserRole::from_name(&role).is_some() => {
                Ok(Value::String(role))
            }
            other => Err(ScalarParseError::new(format!(
                "invalid value when serializing user role: {other}"
            ))),
        }
    }
}
