use ink_core::{FieldErrors, TokenStoreError};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy for everything the client can surface.
///
/// Derived from the response status where a response exists; `Network`
/// covers transport failures where none does.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),

    #[error("Registration succeeded but automatic login failed: {source}")]
    AutoLogin {
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Classify a non-success response into the taxonomy. `body` is the raw
    /// response text; DRF-style JSON object bodies are mined for a `detail`
    /// message or field-level errors.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str, path: &str) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Self::Unauthorized {
                detail: detail_from_body(body).unwrap_or_else(|| "Authentication required".into()),
            };
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Self::NotFound {
                resource: path.to_string(),
            };
        }
        if status.is_client_error() {
            return Self::Validation(field_errors_from_body(body));
        }
        Self::Server {
            status: status.as_u16(),
            message: detail_from_body(body).unwrap_or_else(|| truncate(body, 200)),
        }
    }

    /// A single displayable message for operation-level error surfaces.
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized { detail } => detail.clone(),
            Self::Validation(fields) => fields.to_string(),
            other => other.to_string(),
        }
    }
}

/// Extract a DRF `{"detail": "..."}` message, if the body carries one.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

/// Parse a DRF validation body: a JSON object mapping field names to a
/// message or an array of messages. Anything unparsable lands under a
/// catch-all key so the message is never lost.
fn field_errors_from_body(body: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            for (field, value) in map {
                match value {
                    serde_json::Value::String(message) => errors.push(field, message),
                    serde_json::Value::Array(messages) => {
                        for message in messages {
                            if let Some(text) = message.as_str() {
                                errors.push(field.as_str(), text);
                            }
                        }
                    }
                    other => errors.push(field, other.to_string()),
                }
            }
        }
        _ => errors.push("detail", truncate(body, 200)),
    }
    errors
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_401_with_detail() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Token is invalid or expired"}"#,
            "/auth/verify/",
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), "Token is invalid or expired");
    }

    #[test]
    fn maps_404_to_not_found() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "", "/notes/42/");
        assert!(matches!(err, ApiError::NotFound { resource } if resource == "/notes/42/"));
    }

    #[test]
    fn maps_400_field_errors() {
        let body = r#"{"email": ["An account with this email already exists"], "username": "This username is already taken"}"#;
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, body, "/auth/register/");
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.get("email").unwrap(),
            &["An account with this email already exists".to_string()]
        );
        assert_eq!(
            fields.get("username").unwrap(),
            &["This username is already taken".to_string()]
        );
    }

    #[test]
    fn maps_5xx_to_server() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down", "/notes/");
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
    }

    #[test]
    fn unparsable_4xx_body_is_preserved() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "plain text", "/notes/");
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("detail").unwrap(), &["plain text".to_string()]);
    }
}
