//! Product Reviews Domain
//!
//! JSON:API surface for product reviews: reading paginated reviews of an
//! abstract product, creating reviews, and expanding concrete-product
//! resources with their review relationships. All data access is delegated
//! to injected clients; this crate owns orchestration and response shaping
//! only.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │          Handlers           │  ← HTTP endpoints
//! └──────────────┬──────────────┘
//!                │
//! ┌──────────────▼──────────────┐
//! │  Reader / Creator / Expander│  ← per-operation orchestration
//! └──────────────┬──────────────┘
//!                │
//! ┌──────────────▼──────────────┐
//! │      Response builder       │  ← JSON:API resources, errors, paging
//! └──────────────┬──────────────┘
//!                │
//! ┌──────────────▼──────────────┐
//! │        Client traits        │  ← storage KV, review search, submission
//! └─────────────────────────────┘
//! ```
//!
//! Concrete client implementations live alongside the traits:
//! [`redis::RedisProductStorage`], [`elasticsearch::ElasticsearchReviewSearch`]
//! and [`gateway::HttpReviewGateway`].

pub mod clients;
pub mod config;
pub mod creator;
pub mod elasticsearch;
pub mod error;
pub mod expander;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod reader;
pub mod redis;
pub mod response;

// Re-export commonly used types
pub use clients::{ProductStorageClient, ReviewSearchClient, ReviewSubmissionClient};
pub use config::{
    ProductReviewsConfig, RESOURCE_ABSTRACT_PRODUCTS, RESOURCE_CONCRETE_PRODUCTS,
    RESOURCE_PRODUCT_REVIEWS,
};
pub use creator::ProductReviewCreator;
pub use error::{ClientError, ClientResult};
pub use expander::ReviewRelationshipExpander;
pub use handlers::{ApiDoc, ReviewsState};
pub use models::{
    AbstractProductRecord, ConcreteProductRecord, PageParams, ProductReview, ReviewAttributes,
    ReviewSearchPage, ReviewSubmission, ReviewSubmissionResult, ReviewsRequest,
};
pub use reader::ProductReviewReader;
pub use response::ReviewResponseBuilder;
