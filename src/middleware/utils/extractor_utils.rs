use axum::body::Body;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{
    async_trait,
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::middleware::error::ErrorResponseBody;

/// Deserializes a JSON or urlencoded body and runs its `validator` rules.
#[derive(Debug)]
pub struct JsonOrFormValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrFormValidated<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<(), Rejection = JsonRejection>,
    Form<T>: FromRequest<(), Rejection = FormRejection>,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let payload: T = match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(payload) = req
                    .extract::<Json<T>, _>()
                    .await
                    .map_err(|err| bad_request(err.body_text()))?;
                payload
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(payload) = req
                    .extract::<Form<T>, _>()
                    .await
                    .map_err(|err| bad_request(err.body_text()))?;
                payload
            }
            _ => return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()),
        };

        payload
            .validate()
            .map_err(|err| bad_request(err.to_string()))?;

        Ok(Self(payload))
    }
}

fn bad_request(error: String) -> Response {
    let body = ErrorResponseBody::new(error, None);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
