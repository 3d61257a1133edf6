use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::response::Response;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::binding::{BindingResult, object_name};
use crate::app::AppState;
use crate::error::{MethodArgumentNotValid, RequestError, UnreadableBody};

/// JSON body extractor that also runs `validator` constraints.
///
/// Failures never reach the handler: they are rendered by the router's
/// `ErrorResponder` in the locale resolved from `Accept-Language`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        // La locale doit être lue avant que la requête ne soit consommée
        let locale = state.locales.resolve(req.headers());

        match parse_and_validate::<T>(req, state).await {
            Ok(value) => Ok(Self(value)),
            Err(error) => Err(state.responder.respond(&error, &locale)),
        }
    }
}

async fn parse_and_validate<T>(req: Request, state: &AppState) -> Result<T, RequestError>
where
    T: DeserializeOwned + Validate + Send,
{
    let Json(value) = Json::<T>::from_request(req, state)
        .await
        .map_err(UnreadableBody::from)?;

    value.validate().map_err(|errors| {
        MethodArgumentNotValid::new(BindingResult::from_validation_errors(
            object_name::<T>(),
            &errors,
        ))
    })?;

    Ok(value)
}
