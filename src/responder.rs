use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use money_api_types::ErrorEntry;

use crate::error::{MethodArgumentNotValid, RequestError, UnreadableBody};
use crate::i18n::{Locale, MessageArgs, MessageSource};
use crate::response::AppResponse;

/// Bundle key of the user message for every unreadable body.
pub const UNREADABLE_BODY_KEY: &str = "message.fail";

/// Translates request errors into 400 responses with a localized
/// `userMessage` and a raw `devMessage`.
#[derive(Clone)]
pub struct ErrorResponder {
    messages: Arc<dyn MessageSource>,
}

impl ErrorResponder {
    pub fn new(messages: Arc<dyn MessageSource>) -> Self {
        Self { messages }
    }

    /// Dispatches each error kind to its handler.
    pub fn respond(&self, error: &RequestError, locale: &Locale) -> Response {
        match error {
            RequestError::UnreadableBody(error) => {
                self.handle_unreadable_body(error, locale).into_response()
            }
            RequestError::ValidationFailed(error) => {
                self.handle_validation_failure(error, locale).into_response()
            }
        }
    }

    pub fn handle_unreadable_body(
        &self,
        error: &UnreadableBody,
        locale: &Locale,
    ) -> AppResponse<ErrorEntry> {
        let user_message = self
            .messages
            .message(UNREADABLE_BODY_KEY, &MessageArgs::none(), locale);
        let dev_message = error.dev_message();

        tracing::debug!(%locale, dev_message, "Unreadable request body");

        AppResponse::bad_request(ErrorEntry::new(user_message, dev_message))
            .with_headers(content_language(locale))
    }

    pub fn handle_validation_failure(
        &self,
        error: &MethodArgumentNotValid,
        locale: &Locale,
    ) -> AppResponse<Vec<ErrorEntry>> {
        let binding_result = error.binding_result();
        let entries: Vec<ErrorEntry> = binding_result
            .field_errors()
            .iter()
            .map(|field_error| {
                ErrorEntry::new(
                    self.messages.field_message(field_error, locale),
                    field_error.to_string(),
                )
            })
            .collect();

        tracing::debug!(
            %locale,
            object = binding_result.object_name(),
            errors = entries.len(),
            "Request validation failed"
        );

        AppResponse::bad_request(entries).with_headers(content_language(locale))
    }
}

fn content_language(locale: &Locale) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&locale.to_string()) {
        headers.insert(header::CONTENT_LANGUAGE, value);
    }
    headers
}
