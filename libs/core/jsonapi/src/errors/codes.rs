//! Type-safe error codes for API responses.
//!
//! Single source of truth for the machine-readable codes the API emits.
//! Each code carries:
//! - a string identifier for client consumption (e.g. "ABSTRACT_PRODUCT_NOT_FOUND")
//! - an integer code for logging and monitoring
//! - a default human-readable detail
//! - the HTTP status the error is reported with

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body failed envelope or attribute validation
    InvalidRequestBody,

    /// The parent abstract-product SKU is missing from the request path
    AbstractProductSkuMissing,

    /// The referenced abstract product does not exist
    AbstractProductNotFound,

    /// The referenced concrete product does not exist
    ConcreteProductNotFound,

    /// The review submission was rejected by business rules
    ReviewSubmissionFailed,

    /// Reading a single review by id is not supported
    NotImplemented,

    /// No route matches the requested path
    RouteNotFound,

    // Server errors (2000-2999)
    /// An unexpected internal error occurred
    InternalError,

    /// A storage, search or submission backend could not be reached
    UpstreamUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::AbstractProductSkuMissing => "ABSTRACT_PRODUCT_SKU_MISSING",
            ErrorCode::AbstractProductNotFound => "ABSTRACT_PRODUCT_NOT_FOUND",
            ErrorCode::ConcreteProductNotFound => "CONCRETE_PRODUCT_NOT_FOUND",
            ErrorCode::ReviewSubmissionFailed => "REVIEW_SUBMISSION_FAILED",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
            ErrorCode::RouteNotFound => "ROUTE_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::InvalidRequestBody => 1001,
            ErrorCode::AbstractProductSkuMissing => 1101,
            ErrorCode::AbstractProductNotFound => 1102,
            ErrorCode::ConcreteProductNotFound => 1103,
            ErrorCode::ReviewSubmissionFailed => 1104,
            ErrorCode::NotImplemented => 1105,
            ErrorCode::RouteNotFound => 1002,
            ErrorCode::InternalError => 2000,
            ErrorCode::UpstreamUnavailable => 2001,
        }
    }

    pub fn default_detail(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequestBody => "Request body validation failed.",
            ErrorCode::AbstractProductSkuMissing => "Abstract product SKU is not specified.",
            ErrorCode::AbstractProductNotFound => "Abstract product is not found.",
            ErrorCode::ConcreteProductNotFound => "Concrete product is not found.",
            ErrorCode::ReviewSubmissionFailed => "Product review could not be submitted.",
            ErrorCode::NotImplemented => "Not implemented.",
            ErrorCode::RouteNotFound => "The requested route does not exist.",
            ErrorCode::InternalError => "An internal error occurred.",
            ErrorCode::UpstreamUnavailable => "A backend service is unavailable.",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequestBody => StatusCode::BAD_REQUEST,
            ErrorCode::AbstractProductSkuMissing => StatusCode::BAD_REQUEST,
            ErrorCode::AbstractProductNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ConcreteProductNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ReviewSubmissionFailed => StatusCode::FORBIDDEN,
            ErrorCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorCode::RouteNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}
