use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Generic response envelope for handlers and error translation.
///
/// # Examples
///
/// ```rust,ignore
/// // Created resource
/// AppResponse::created(person)
///
/// // Error payload with a Content-Language header
/// AppResponse::bad_request(vec![entry]).with_headers(headers)
/// ```
pub struct AppResponse<T> {
    status: StatusCode,
    headers: Option<HeaderMap>,
    body: T,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    /// Creates a new response with a status code and a JSON body
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: None,
            body,
        }
    }

    /// Adds HTTP headers to the response
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    // === Convenience constructors ===

    /// 200 OK
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// 201 Created
    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    /// 400 Bad Request
    pub fn bad_request(body: T) -> Self {
        Self::new(StatusCode::BAD_REQUEST, body)
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();

        if let Some(headers) = self.headers {
            response.headers_mut().extend(headers);
        }

        response
    }
}
