//! Error types for the Honeycomb client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the client
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error("Invalid API response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} ID is required")]
    MissingId(&'static str),

    #[error("Invalid request path '{0}': {1}")]
    InvalidPath(String, url::ParseError),

    #[error("Invalid pagination link: {0}")]
    Pagination(url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The normalized API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_not_found)
    }
}

/// One entry of structured detail attached to an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorDetail {
    pub code: Option<String>,
    pub description: String,
    pub field: Option<String>,
}

/// The normalized error every non-successful API response is converted into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} {title}: {message}{}", render_details(.details))]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Problem type URI, when the server supplied one
    pub kind: Option<String>,
    /// Machine title (e.g. "Not Found")
    pub title: String,
    /// Human-readable message
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

fn render_details(details: &[ErrorDetail]) -> String {
    if details.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = details
        .iter()
        .map(|d| match (&d.field, &d.code) {
            (Some(field), _) => format!("{}: {}", field, d.description),
            (None, Some(code)) => format!("{} ({})", d.description, code),
            (None, None) => d.description.clone(),
        })
        .collect();
    format!(" [{}]", parts.join("; "))
}

/// JSON:API error document: `{"errors": [...]}`
#[derive(Deserialize)]
struct JsonApiErrors {
    errors: Vec<JsonApiErrorObject>,
}

#[derive(Deserialize)]
struct JsonApiErrorObject {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    source: Option<JsonApiErrorSource>,
}

#[derive(Deserialize)]
struct JsonApiErrorSource {
    #[serde(default)]
    pointer: Option<String>,
}

/// RFC 7807 problem document as served by the Honeycomb API
#[derive(Deserialize)]
struct ProblemDocument {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    type_detail: Vec<ProblemDetail>,
}

#[derive(Deserialize)]
struct ProblemDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

impl ApiError {
    /// Build the normalized error from a response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_parts(status, &body)
    }

    /// Build the normalized error from a status code and raw body.
    pub fn from_parts(status: StatusCode, body: &str) -> Self {
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();

        if let Ok(doc) = serde_json::from_str::<JsonApiErrors>(body) {
            if !doc.errors.is_empty() {
                return Self::from_jsonapi(status, reason, doc.errors);
            }
        }

        if let Ok(problem) = serde_json::from_str::<ProblemDocument>(body) {
            let message = problem.error.or(problem.detail);
            if problem.title.is_some() || message.is_some() {
                return Self {
                    status: status.as_u16(),
                    kind: problem.kind,
                    title: problem.title.unwrap_or_else(|| reason.clone()),
                    message: message.unwrap_or(reason),
                    details: problem
                        .type_detail
                        .into_iter()
                        .map(|d| ErrorDetail {
                            code: d.code,
                            description: d.description.unwrap_or_default(),
                            field: d.field,
                        })
                        .collect(),
                };
            }
        }

        let trimmed = body.trim();
        Self {
            status: status.as_u16(),
            kind: None,
            message: if trimmed.is_empty() {
                reason.clone()
            } else {
                trimmed.to_string()
            },
            title: reason,
            details: Vec::new(),
        }
    }

    fn from_jsonapi(status: StatusCode, reason: String, errors: Vec<JsonApiErrorObject>) -> Self {
        let title = errors
            .iter()
            .find_map(|e| e.title.clone())
            .unwrap_or_else(|| reason.clone());
        let message = errors
            .iter()
            .find_map(|e| e.detail.clone())
            .unwrap_or_else(|| title.clone());

        // A lone error with nothing beyond its detail is fully carried by the message
        let several = errors.len() > 1;
        let details = errors
            .into_iter()
            .filter(|e| several || e.code.is_some() || e.source.is_some())
            .map(|e| ErrorDetail {
                code: e.code,
                description: e.detail.or(e.title).unwrap_or_default(),
                field: e.source.and_then(|s| s.pointer),
            })
            .collect();

        Self {
            status: status.as_u16(),
            kind: None,
            title,
            message,
            details,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }

    pub fn is_conflict(&self) -> bool {
        self.status == StatusCode::CONFLICT.as_u16()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }
}

/// Configuration-related errors, raised before any network call
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key ID not configured. Set HONEYCOMB_KEY_ID or pass --key-id.")]
    MissingKeyId,

    #[error("API key secret not configured. Set HONEYCOMB_KEY_SECRET or pass --key-secret.")]
    MissingKeySecret,

    #[error("Invalid API endpoint '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Invalid page size {0}: must be between 1 and 100")]
    InvalidPageSize(usize),

    #[error("Configuration file not found. Run `hnyctl config set` to create one.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
