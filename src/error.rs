//! Error types for Clubhouse API operations.

use std::fmt;

use thiserror::Error;

/// HTTP status failures the Clubhouse API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: the request body did not match the endpoint schema.
    SchemaMismatch,
    /// 401: the token was missing or rejected.
    Unauthorized,
    /// 404: the resource does not exist.
    ResourceNotFound,
    /// 422: the request was well formed but could not be applied.
    Unprocessable,
    /// 500: the server failed.
    ServerError,
}

impl ErrorKind {
    /// Map an HTTP status code to an error kind.
    ///
    /// Returns `None` for every status the API treats as success.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::SchemaMismatch),
            401 => Some(Self::Unauthorized),
            404 => Some(Self::ResourceNotFound),
            422 => Some(Self::Unprocessable),
            500 => Some(Self::ServerError),
            _ => None,
        }
    }

    /// The HTTP status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::SchemaMismatch => 400,
            Self::Unauthorized => 401,
            Self::ResourceNotFound => 404,
            Self::Unprocessable => 422,
            Self::ServerError => 500,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::SchemaMismatch => "Schema mismatch",
            Self::Unauthorized => "Unauthorized",
            Self::ResourceNotFound => "Resource does not exist",
            Self::Unprocessable => "Unprocessable",
            Self::ServerError => "Server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.status_code())
    }
}

/// A request the API answered with an error status.
///
/// Carries the raw bodies for diagnostics. The URL never contains the
/// auth token.
#[derive(Debug, Clone)]
pub struct RequestError {
    /// HTTP method of the failed request.
    pub method: String,
    /// Request URL with the token redacted.
    pub url: String,
    /// What the status code means.
    pub kind: ErrorKind,
    /// Server-provided detail (422 responses only).
    pub message: Option<String>,
    /// Body that was sent. Empty for multipart uploads.
    pub request_body: Vec<u8>,
    /// Body that came back.
    pub response_body: Vec<u8>,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.method, self.url, self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Errors that can occur during Clubhouse API operations.
#[derive(Debug, Error)]
pub enum ClubhouseError {
    /// Configuration is missing or incomplete.
    #[error("Clubhouse configuration required: {0}")]
    ConfigMissing(String),

    /// A configuration value could not be used.
    #[error("Invalid Clubhouse configuration: {0}")]
    InvalidConfig(String),

    /// A URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("clubhouse client request error: {0}")]
    Request(Box<RequestError>),

    /// Request parameters could not be encoded.
    #[error("could not marshal params: {0}")]
    Marshal(#[source] serde_json::Error),

    /// A response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    /// A command-line argument does not fit the requested operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClubhouseError {
    /// The status kind, if the API rejected the request.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Request(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::ResourceNotFound)
    }
}

impl From<RequestError> for ClubhouseError {
    fn from(err: RequestError) -> Self {
        Self::Request(Box::new(err))
    }
}

/// Result type alias for Clubhouse operations.
pub type Result<T> = core::result::Result<T, ClubhouseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorKind::from_status(400), Some(ErrorKind::SchemaMismatch));
        assert_eq!(ErrorKind::from_status(401), Some(ErrorKind::Unauthorized));
        assert_eq!(ErrorKind::from_status(404), Some(ErrorKind::ResourceNotFound));
        assert_eq!(ErrorKind::from_status(422), Some(ErrorKind::Unprocessable));
        assert_eq!(ErrorKind::from_status(500), Some(ErrorKind::ServerError));
        assert_eq!(ErrorKind::from_status(200), None);
        assert_eq!(ErrorKind::from_status(204), None);
        assert_eq!(ErrorKind::from_status(403), None);
    }

    #[test]
    fn test_request_error_display() {
        let err: ClubhouseError = RequestError {
            method: "PUT".to_string(),
            url: "https://api.clubhouse.io/api/v2/categories/17".to_string(),
            kind: ErrorKind::Unprocessable,
            message: Some("name already taken".to_string()),
            request_body: b"{}".to_vec(),
            response_body: vec![],
        }
        .into();

        assert_eq!(
            err.to_string(),
            "clubhouse client request error: PUT https://api.clubhouse.io/api/v2/categories/17: \
             Unprocessable (422): name already taken"
        );
        assert_eq!(err.kind(), Some(ErrorKind::Unprocessable));
        assert!(!err.is_not_found());
    }
}
