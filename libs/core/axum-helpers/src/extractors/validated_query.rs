//! Query-string extractor with validation, the `Query` counterpart of [`ValidatedJson`].
//!
//! [`ValidatedJson`]: super::ValidatedJson

use super::field_error_details;
use crate::errors::{AppError, ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        params.validate().map_err(|e| {
            tracing::info!(error_code = ErrorCode::ValidationError.code(), "Rejected query: {}", e);
            let body = ErrorResponse::new(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            )
            .with_details(field_error_details(&e));

            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        })?;

        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Params {
        #[validate(range(min = 1, max = 100))]
        #[serde(default = "default_limit")]
        limit: u64,
    }

    fn default_limit() -> u64 {
        10
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|ValidatedQuery(p): ValidatedQuery<Params>| async move { p.limit.to_string() }),
        )
    }

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_apply_when_absent() {
        let (status, body) = call("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"10");
    }

    #[tokio::test]
    async fn test_out_of_range_is_validation_error() {
        let (status, body) = call("/?limit=101").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "VALIDATION_ERROR");
        assert_eq!(json(&body)["details"]["limit"][0]["code"], "range");
    }

    #[tokio::test]
    async fn test_unparseable_value_is_query_extraction_error() {
        let (status, body) = call("/?limit=ten").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "QUERY_EXTRACTION");
    }
}
