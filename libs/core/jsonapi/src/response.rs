use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::document::{JsonApiDocument, PageMeta, RestResource, MEDIA_TYPE};
use crate::errors::{ErrorCode, JsonApiError};

/// A response value: HTTP status plus a JSON:API document.
///
/// Every public operation returns one of these, success or error; failures
/// are data, not exceptions.
#[derive(Debug, Clone)]
pub struct RestResponse {
    status: StatusCode,
    document: JsonApiDocument,
}

impl RestResponse {
    pub fn single(status: StatusCode, resource: RestResource) -> Self {
        Self {
            status,
            document: JsonApiDocument::from_resource(resource),
        }
    }

    pub fn collection(status: StatusCode, resources: Vec<RestResource>, meta: Option<PageMeta>) -> Self {
        Self {
            status,
            document: JsonApiDocument::from_resources(resources, meta),
        }
    }

    /// Error response carrying the code's default detail.
    pub fn error(code: ErrorCode) -> Self {
        Self {
            status: code.status(),
            document: JsonApiDocument::from_errors(vec![JsonApiError::from_code(code)]),
        }
    }

    /// Error response with a custom detail message.
    pub fn error_with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            document: JsonApiDocument::from_errors(vec![JsonApiError::with_detail(code, detail)]),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn document(&self) -> &JsonApiDocument {
        &self.document
    }

    pub fn is_error(&self) -> bool {
        !self.document.errors.is_empty()
    }

    /// First error code string, if this is an error response.
    pub fn error_code(&self) -> Option<&str> {
        self.document.errors.first().map(|e| e.code.as_str())
    }
}

impl IntoResponse for RestResponse {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.document) {
            Ok(body) => (
                self.status,
                [(header::CONTENT_TYPE, MEDIA_TYPE)],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize JSON:API document: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_carries_code_and_status() {
        let response = RestResponse::error(ErrorCode::AbstractProductSkuMissing);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.is_error());
        assert_eq!(response.error_code(), Some("ABSTRACT_PRODUCT_SKU_MISSING"));
    }

    #[test]
    fn test_single_response_is_not_error() {
        let resource = RestResource::new("product-reviews", "1", json!({"rating": 5}));
        let response = RestResponse::single(StatusCode::ACCEPTED, resource);
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(!response.is_error());
        assert_eq!(response.error_code(), None);
    }
}
