use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("Unsupported status type: `{0}`")]
    UnsupportedStatusType(String),
    #[error("Unexpected revocation status: `{0}`")]
    UnexpectedStatus(String),
    #[error("HTTP request error: `{0}`")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("URL error: `{0}`")]
    UrlError(#[from] url::ParseError),
}
