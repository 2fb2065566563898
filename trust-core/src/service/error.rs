use thiserror::Error;
use trust_providers::{
    common_models::did::DidValue,
    exchange_protocol::self_issued::error::{PresentationGateError, SelfIssuedTokenError},
    storage::StorageError,
};

#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("No wallet for `{0}`")]
    UnknownWallet(DidValue),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Self-issued token error: `{0}`")]
    Token(#[from] SelfIssuedTokenError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum PresentationServiceError {
    #[error("Token `{0}` was already used")]
    AlreadyUsed(String),
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Malformed token: `{0}`")]
    MalformedToken(String),
    #[error("Malformed presentation: `{0}`")]
    MalformedPresentation(String),
    #[error("Presentation error: `{0}`")]
    Gate(#[from] PresentationGateError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

impl From<SelfIssuedTokenError> for PresentationServiceError {
    fn from(value: SelfIssuedTokenError) -> Self {
        match value {
            SelfIssuedTokenError::MalformedToken(reason) => Self::MalformedToken(reason),
            SelfIssuedTokenError::Storage(error) => Self::Storage(error),
            other => Self::InvalidToken(other.to_string()),
        }
    }
}

impl PresentationServiceError {
    /// Whether the failure lies with the request rather than this service.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::AlreadyUsed(_)
            | Self::InvalidToken(_)
            | Self::MalformedToken(_)
            | Self::MalformedPresentation(_) => true,
            Self::Gate(error) => matches!(
                error,
                PresentationGateError::MalformedToken(_)
                    | PresentationGateError::InvalidScope(_)
                    | PresentationGateError::PermissionViolation(_)
                    | PresentationGateError::MissingCredentialType(_)
                    | PresentationGateError::UnknownHolder(_)
            ),
            Self::Storage(_) => false,
        }
    }
}
