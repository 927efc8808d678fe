//! Extractor for JSON:API request bodies with automatic validation.

use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::errors::ErrorCode;
use crate::response::RestResponse;

/// Attribute set of a creatable resource, tied to its wire type name.
pub trait ResourceAttributes: DeserializeOwned + Validate {
    /// The `type` member the request envelope must carry.
    const RESOURCE_TYPE: &'static str;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: EnvelopeData<T>,
}

#[derive(Deserialize)]
struct EnvelopeData<T> {
    #[serde(rename = "type")]
    resource_type: String,
    attributes: T,
}

/// Extracts `{data: {type, attributes}}` request bodies.
///
/// Rejects with a JSON:API error document when the body does not parse, the
/// `type` member does not match [`ResourceAttributes::RESOURCE_TYPE`], or the
/// attributes fail validation.
///
/// # Example
/// ```ignore
/// async fn create_review(
///     JsonApiPayload(attributes): JsonApiPayload<ReviewAttributes>,
/// ) -> RestResponse {
///     /* ... */
/// }
/// ```
pub struct JsonApiPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonApiPayload<T>
where
    T: ResourceAttributes,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(envelope) = Json::<Envelope<T>>::from_request(req, state)
            .await
            .map_err(|e| {
                RestResponse::error_with_detail(ErrorCode::InvalidRequestBody, e.body_text())
                    .into_response()
            })?;

        if envelope.data.resource_type != T::RESOURCE_TYPE {
            return Err(RestResponse::error_with_detail(
                ErrorCode::InvalidRequestBody,
                format!(
                    "Expected resource type '{}', got '{}'",
                    T::RESOURCE_TYPE,
                    envelope.data.resource_type
                ),
            )
            .into_response());
        }

        envelope.data.attributes.validate().map_err(|e| {
            RestResponse::error_with_detail(ErrorCode::InvalidRequestBody, e.to_string())
                .into_response()
        })?;

        Ok(JsonApiPayload(envelope.data.attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct NoteAttributes {
        #[validate(length(min = 1, max = 10))]
        text: String,
    }

    impl ResourceAttributes for NoteAttributes {
        const RESOURCE_TYPE: &'static str = "notes";
    }

    fn request(body: serde_json::Value) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_matching_envelope() {
        let req = request(json!({"data": {"type": "notes", "attributes": {"text": "hi"}}}));
        let JsonApiPayload(attributes) = JsonApiPayload::<NoteAttributes>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(attributes.text, "hi");
    }

    #[tokio::test]
    async fn test_rejects_wrong_resource_type() {
        let req = request(json!({"data": {"type": "reviews", "attributes": {"text": "hi"}}}));
        let rejection = JsonApiPayload::<NoteAttributes>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_invalid_attributes() {
        let req = request(json!({"data": {"type": "notes", "attributes": {"text": ""}}}));
        let rejection = JsonApiPayload::<NoteAttributes>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_missing_envelope() {
        let req = request(json!({"text": "hi"}));
        let rejection = JsonApiPayload::<NoteAttributes>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }
}
