use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Home,
    Away,
    #[serde(rename = "h2h")]
    H2H,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Home => "home",
            Role::Away => "away",
            Role::H2H => "h2h",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Data-quality problems found while normalizing. These are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizeIssue {
    #[error("malformed input: expected object or array at root, found {found}")]
    MalformedInput { found: &'static str },
    #[error("partial data for {role}: {found} fields found, expected at least {threshold}")]
    PartialData {
        role: Role,
        found: usize,
        threshold: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("value is null, empty or N/A")]
    Missing,
    #[error("expected a number, got {0:?}")]
    NotNumeric(String),
    #[error("expected a string for form field")]
    NotText,
    #[error("non-finite number")]
    NonFinite,
}

pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
