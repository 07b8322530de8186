//! API problem documents (RFC 7807)
//!
//! [`hal_problem`] translates any error implementing [`ProblemSource`] into
//! an `application/problem+json` document. It never fails.

use crate::core::error::HalError;
use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Media type of every problem document
pub const PROBLEM_MEDIA_TYPE: &str = "application/problem+json";

/// Documentation base prefixed to the problem `type`
pub const PROBLEM_TYPE_BASE: &str = "http://docs.nterprise.com/docs/api/errors/";

const INTERNAL_SERVER_ERROR_TITLE: &str = "Internal Server Error";

/// What the problem mapper needs to know about an error
pub trait ProblemSource {
    /// HTTP status carried by the error, if any (defaults to 500)
    fn status_code(&self) -> Option<StatusCode>;

    /// Class-style name of the error (e.g., "BadRequestError")
    fn error_name(&self) -> String;

    /// Human-readable message used as the problem `detail`
    fn detail(&self) -> String;

    /// Validation details copied verbatim to `validation_messages`
    fn validation_messages(&self) -> Option<Value> {
        None
    }
}

/// Body of a problem document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub detail: String,
    pub status: u16,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_messages: Option<Value>,
}

/// A complete problem response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDocument {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub body: ProblemBody,
}

impl IntoResponse for ProblemDocument {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, self.media_type)],
            Json(self.body),
        )
            .into_response()
    }
}

/// Build a problem document using [`PROBLEM_TYPE_BASE`]
pub fn hal_problem<E: ProblemSource + ?Sized>(error: &E) -> ProblemDocument {
    hal_problem_with_base(error, PROBLEM_TYPE_BASE)
}

/// Build a problem document with a custom documentation base
pub fn hal_problem_with_base<E: ProblemSource + ?Sized>(error: &E, base: &str) -> ProblemDocument {
    let status = error
        .status_code()
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let title = if status == StatusCode::INTERNAL_SERVER_ERROR {
        INTERNAL_SERVER_ERROR_TITLE.to_string()
    } else {
        title_from_name(&error.error_name())
    };

    ProblemDocument {
        status_code: status.as_u16(),
        media_type: PROBLEM_MEDIA_TYPE,
        body: ProblemBody {
            type_uri: format!("{}{}", base, pascal_case(&title)),
            detail: error.detail(),
            status: status.as_u16(),
            title,
            validation_messages: error.validation_messages(),
        },
    }
}

/// "BadRequestError" → "Bad Request"
fn title_from_name(name: &str) -> String {
    let name = name.strip_suffix("Error").unwrap_or(name);
    let mut title = String::with_capacity(name.len() + 4);

    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            title.push(' ');
        }
        title.push(c);
    }

    title.trim().to_string()
}

/// "Bad Request" → "BadRequest"
fn pascal_case(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Class-style error name for a status, e.g. 404 → "NotFoundError"
pub fn error_name_for_status(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    format!("{}Error", pascal_case(&reason.replace('\'', "")))
}

// =============================================================================
// HttpError
// =============================================================================

/// A plain HTTP error: a status, a message and optional validation details
#[derive(Debug, Clone)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Attach validation details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HttpError {}

impl ProblemSource for HttpError {
    fn status_code(&self) -> Option<StatusCode> {
        Some(self.status)
    }

    fn error_name(&self) -> String {
        error_name_for_status(self.status)
    }

    fn detail(&self) -> String {
        self.message.clone()
    }

    fn validation_messages(&self) -> Option<Value> {
        self.details.clone()
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        hal_problem(&self).into_response()
    }
}

impl ProblemSource for HalError {
    fn status_code(&self) -> Option<StatusCode> {
        Some(HalError::status_code(self))
    }

    fn error_name(&self) -> String {
        error_name_for_status(HalError::status_code(self))
    }

    fn detail(&self) -> String {
        self.to_string()
    }
}

impl ProblemSource for anyhow::Error {
    fn status_code(&self) -> Option<StatusCode> {
        self.downcast_ref::<HttpError>()
            .map(HttpError::status)
            .or_else(|| self.downcast_ref::<HalError>().map(HalError::status_code))
    }

    fn error_name(&self) -> String {
        match ProblemSource::status_code(self) {
            Some(status) => error_name_for_status(status),
            None => "Error".to_string(),
        }
    }

    fn detail(&self) -> String {
        self.to_string()
    }

    fn validation_messages(&self) -> Option<Value> {
        self.downcast_ref::<HttpError>()
            .and_then(ProblemSource::validation_messages)
    }
}
