//! # JSON:API helpers
//!
//! Building blocks for JSON:API-shaped REST endpoints on top of Axum.
//!
//! ## Modules
//!
//! - **[`document`]**: resource and document types ([`RestResource`],
//!   [`JsonApiDocument`], pagination meta)
//! - **[`errors`]**: structured error objects with machine-readable codes
//! - **[`extractors`]**: request-body extractor for `{data: {type, attributes}}`
//!   payloads with validation
//! - **[`response`]**: [`RestResponse`] — a status plus a document, convertible
//!   into an Axum response with the JSON:API media type
//! - **[`server`]**: router/server bootstrap (OpenAPI docs, middleware,
//!   graceful shutdown, health endpoint)

pub mod document;
pub mod errors;
pub mod extractors;
pub mod response;
pub mod server;

pub use document::{
    JsonApiDocument, PageMeta, Relationship, ResourceIdentifier, ResourceObject, RestResource,
    MEDIA_TYPE,
};
pub use errors::{ErrorCode, JsonApiError};
pub use extractors::{JsonApiPayload, ResourceAttributes};
pub use response::RestResponse;
pub use server::{create_app, create_router, health_router, shutdown_signal};
