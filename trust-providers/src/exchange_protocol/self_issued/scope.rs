//! `<namespace>:<credential-type>:<operation>` authorization grants.

use std::{fmt, str::FromStr};

use strum::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ScopeOperation {
    Read,
    Write,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub namespace: String,
    pub credential_type: String,
    pub operation: ScopeOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("Empty scope")]
    Empty,
    #[error("Malformed scope: `{0}`")]
    Malformed(String),
    #[error("Unexpected scope namespace `{actual}`, expected `{expected}`")]
    NamespaceMismatch { expected: String, actual: String },
    #[error("Unknown scope operation: `{0}`")]
    UnknownOperation(String),
}

impl Scope {
    /// Whitespace is removed from `credential_type`, as it separates grants.
    pub fn new(
        namespace: impl Into<String>,
        credential_type: impl Into<String>,
        operation: ScopeOperation,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            credential_type: credential_type.into().split_whitespace().collect(),
            operation,
        }
    }

    /// Parses one grant and checks it belongs to `namespace`.
    pub fn parse(value: &str, namespace: &str) -> Result<Self, ScopeError> {
        // namespace may itself contain colons, so split from the right
        let mut parts = value.rsplitn(3, ':');

        let (Some(operation), Some(credential_type), Some(actual_namespace)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScopeError::Malformed(value.to_owned()));
        };

        if credential_type.is_empty() || actual_namespace.is_empty() {
            return Err(ScopeError::Malformed(value.to_owned()));
        }

        if actual_namespace != namespace {
            return Err(ScopeError::NamespaceMismatch {
                expected: namespace.to_owned(),
                actual: actual_namespace.to_owned(),
            });
        }

        let operation = ScopeOperation::from_str(operation)
            .map_err(|_| ScopeError::UnknownOperation(operation.to_owned()))?;

        Ok(Self::new(actual_namespace, credential_type, operation))
    }

    /// Parses a space separated list of grants; at least one is required.
    pub fn parse_all(value: &str, namespace: &str) -> Result<Vec<Self>, ScopeError> {
        let scopes = value
            .split_whitespace()
            .map(|scope| Self::parse(scope, namespace))
            .collect::<Result<Vec<_>, _>>()?;

        if scopes.is_empty() {
            return Err(ScopeError::Empty);
        }

        Ok(scopes)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.namespace, self.credential_type, self.operation
        )
    }
}
