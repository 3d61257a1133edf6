// src/error.rs

use axum::extract::rejection::JsonRejection;

use crate::validation::BindingResult;

/// Request failures translated into localized 400 responses.
///
/// This type has no `IntoResponse` impl: rendering needs the request locale
/// and a `MessageSource`, see `ErrorResponder::respond`.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    UnreadableBody(#[from] UnreadableBody),
    #[error(transparent)]
    ValidationFailed(#[from] MethodArgumentNotValid),
}

/// The request body could not be read as the expected JSON shape.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct UnreadableBody {
    message: String,
    cause: Option<String>,
}

impl UnreadableBody {
    pub fn new(message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Text for developers: the underlying cause, or this error's own
    /// message when the framework reported none.
    pub fn dev_message(&self) -> &str {
        self.cause.as_deref().unwrap_or(&self.message)
    }
}

impl From<JsonRejection> for UnreadableBody {
    fn from(rejection: JsonRejection) -> Self {
        let cause = root_cause(&rejection).map(ToString::to_string);
        Self::new(rejection.body_text(), cause)
    }
}

/// Deepest error in the `source()` chain, if there is any.
fn root_cause<'a>(
    error: &'a (dyn std::error::Error + 'static),
) -> Option<&'a (dyn std::error::Error + 'static)> {
    let mut cause = error.source()?;
    while let Some(next) = cause.source() {
        cause = next;
    }
    Some(cause)
}

/// A parsed payload violated one or more field constraints.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "Validation failed for object '{}' with {} error(s)",
    .binding_result.object_name(),
    .binding_result.error_count()
)]
pub struct MethodArgumentNotValid {
    binding_result: BindingResult,
}

impl MethodArgumentNotValid {
    pub fn new(binding_result: BindingResult) -> Self {
        Self { binding_result }
    }

    pub fn binding_result(&self) -> &BindingResult {
        &self.binding_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;
    use axum::Json;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Payload {
        age: u32,
    }

    async fn rejection_for(content_type: Option<&str>, body: &'static str) -> JsonRejection {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();
        Json::<Payload>::from_request(request, &()).await.unwrap_err()
    }

    #[tokio::test]
    async fn type_mismatch_keeps_underlying_cause() {
        let rejection = rejection_for(Some("application/json"), r#"{"age": "not-a-number"}"#).await;
        let error = UnreadableBody::from(rejection);

        let cause = error.cause().expect("serde cause");
        assert!(cause.contains("invalid type"), "unexpected cause: {cause}");
        assert_eq!(error.dev_message(), cause);
    }

    #[tokio::test]
    async fn truncated_body_keeps_underlying_cause() {
        let rejection = rejection_for(Some("application/json"), r#"{"age": 4"#).await;
        let error = UnreadableBody::from(rejection);
        assert!(error.cause().is_some());
    }

    #[tokio::test]
    async fn missing_content_type_has_no_cause() {
        let rejection = rejection_for(None, r#"{"age": 4}"#).await;
        let error = UnreadableBody::from(rejection);

        assert!(error.cause().is_none());
        assert_eq!(error.dev_message(), error.message());
        assert!(!error.dev_message().is_empty());
    }

    #[test]
    fn validation_failure_display_counts_errors() {
        let result = BindingResult::new("createPersonRequest")
            .with_field_error(FieldError::new("createPersonRequest", "email", "email"));
        let error = RequestError::from(MethodArgumentNotValid::new(result));
        assert_eq!(
            error.to_string(),
            "Validation failed for object 'createPersonRequest' with 1 error(s)"
        );
    }
}
