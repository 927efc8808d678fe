pub mod codes;

pub use codes::ErrorCode;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A JSON:API error object: HTTP status, machine-readable code and a
/// human-readable detail string.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 400,
///   "code": "ABSTRACT_PRODUCT_SKU_MISSING",
///   "detail": "Abstract product SKU is not specified."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JsonApiError {
    /// HTTP status code applicable to the problem
    pub status: u16,
    /// Machine-readable error identifier for programmatic handling
    pub code: String,
    /// Human-readable explanation
    pub detail: String,
}

impl JsonApiError {
    /// Build an error carrying the code's default detail.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            status: code.status().as_u16(),
            code: code.as_str().to_string(),
            detail: code.default_detail().to_string(),
        }
    }

    /// Build an error with a custom detail message.
    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            status: code.status().as_u16(),
            code: code.as_str().to_string(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_code() {
        let error = JsonApiError::from_code(ErrorCode::AbstractProductNotFound);
        assert_eq!(error.status, 404);
        assert_eq!(error.code, "ABSTRACT_PRODUCT_NOT_FOUND");
        assert!(!error.detail.is_empty());
    }

    #[test]
    fn test_error_with_detail() {
        let error = JsonApiError::with_detail(ErrorCode::InvalidRequestBody, "rating out of range");
        assert_eq!(error.status, 400);
        assert_eq!(error.detail, "rating out of range");
    }

    #[test]
    fn test_error_serialization_shape() {
        let value = serde_json::to_value(JsonApiError::from_code(ErrorCode::NotImplemented)).unwrap();
        assert_eq!(value["status"], 501);
        assert_eq!(value["code"], "NOT_IMPLEMENTED");
    }
}
