//! HTTP handlers for the Product Reviews API

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use jsonapi::{ErrorCode, JsonApiDocument, JsonApiPayload, RestResource, RestResponse};

use crate::clients::{ProductStorageClient, ReviewSearchClient, ReviewSubmissionClient};
use crate::config::{RESOURCE_CONCRETE_PRODUCTS, RESOURCE_PRODUCT_REVIEWS};
use crate::creator::ProductReviewCreator;
use crate::error::ClientResult;
use crate::expander::ReviewRelationshipExpander;
use crate::models::{PageParams, ReviewAttributes, ReviewsRequest};
use crate::reader::ProductReviewReader;

/// Header carrying the customer reference of the review author.
pub const CUSTOMER_REFERENCE_HEADER: &str = "x-customer-reference";

const DEFAULT_LOCALE: &str = "en_US";

/// OpenAPI documentation for the Product Reviews API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_product_reviews,
        get_product_review,
        create_product_review,
        get_concrete_product,
    ),
    components(schemas(JsonApiDocument, ReviewAttributes)),
    tags(
        (name = "Product Reviews", description = "Product review resources and relationships")
    )
)]
pub struct ApiDoc;

/// Shared state of the review routes: the three processors plus the storage
/// client used to resolve concrete products.
pub struct ReviewsState<S, R, C> {
    pub reader: Arc<ProductReviewReader<S, R>>,
    pub creator: ProductReviewCreator<C>,
    pub expander: ReviewRelationshipExpander<S, R>,
    pub storage_client: Arc<S>,
}

/// Create the product-reviews router with all HTTP endpoints
pub fn router<S, R, C>(state: ReviewsState<S, R, C>) -> Router
where
    S: ProductStorageClient + 'static,
    R: ReviewSearchClient + 'static,
    C: ReviewSubmissionClient + 'static,
{
    let shared_state = Arc::new(state);

    Router::new()
        .route(
            "/abstract-products/{sku}/product-reviews",
            get(get_product_reviews::<S, R, C>).post(create_product_review::<S, R, C>),
        )
        .route(
            "/abstract-products/{sku}/product-reviews/{id}",
            get(get_product_review::<S, R, C>),
        )
        .route(
            "/concrete-products/{sku}",
            get(get_concrete_product::<S, R, C>),
        )
        .with_state(shared_state)
}

/// Query parameters of review collection reads
#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
pub struct ReviewsQuery {
    /// Zero-based offset into the review collection
    #[serde(rename = "page[offset]")]
    pub page_offset: Option<u64>,
    /// Maximum number of reviews per page
    #[serde(rename = "page[limit]")]
    pub page_limit: Option<u64>,
    /// Store locale, e.g. "de_DE"
    pub locale: Option<String>,
}

impl ReviewsQuery {
    fn locale(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
    }

    fn page(&self) -> Option<PageParams> {
        if self.page_offset.is_none() && self.page_limit.is_none() {
            return None;
        }
        Some(PageParams {
            offset: self.page_offset.unwrap_or(0),
            limit: self.page_limit.unwrap_or(0),
        })
    }
}

/// List reviews of an abstract product
#[utoipa::path(
    get,
    path = "/abstract-products/{sku}/product-reviews",
    tag = "Product Reviews",
    params(
        ("sku" = String, Path, description = "Abstract product SKU"),
        ReviewsQuery
    ),
    responses(
        (status = 200, description = "Paginated review collection", body = JsonApiDocument),
        (status = 404, description = "Abstract product not found", body = JsonApiDocument),
        (status = 502, description = "Backend unavailable", body = JsonApiDocument)
    )
)]
async fn get_product_reviews<S, R, C>(
    State(state): State<Arc<ReviewsState<S, R, C>>>,
    Path(sku): Path<String>,
    Query(query): Query<ReviewsQuery>,
) -> ClientResult<RestResponse>
where
    S: ProductStorageClient,
    R: ReviewSearchClient,
    C: ReviewSubmissionClient,
{
    let request = ReviewsRequest {
        parent_abstract_sku: Some(sku),
        review_id: None,
        locale: query.locale(),
        customer_reference: None,
        page: query.page(),
    };
    state.reader.get_product_reviews(&request).await
}

/// Read a single review (not supported)
#[utoipa::path(
    get,
    path = "/abstract-products/{sku}/product-reviews/{id}",
    tag = "Product Reviews",
    params(
        ("sku" = String, Path, description = "Abstract product SKU"),
        ("id" = String, Path, description = "Review id")
    ),
    responses(
        (status = 501, description = "Single review reads are not implemented", body = JsonApiDocument)
    )
)]
async fn get_product_review<S, R, C>(
    State(state): State<Arc<ReviewsState<S, R, C>>>,
    Path((sku, id)): Path<(String, String)>,
    Query(query): Query<ReviewsQuery>,
) -> ClientResult<RestResponse>
where
    S: ProductStorageClient,
    R: ReviewSearchClient,
    C: ReviewSubmissionClient,
{
    let request = ReviewsRequest {
        parent_abstract_sku: Some(sku),
        review_id: Some(id),
        locale: query.locale(),
        customer_reference: None,
        page: None,
    };
    state.reader.get_product_reviews(&request).await
}

/// Create a review for an abstract product
#[utoipa::path(
    post,
    path = "/abstract-products/{sku}/product-reviews",
    tag = "Product Reviews",
    params(
        ("sku" = String, Path, description = "Abstract product SKU"),
        ReviewsQuery
    ),
    request_body = ReviewAttributes,
    responses(
        (status = 202, description = "Review accepted", body = JsonApiDocument),
        (status = 400, description = "Invalid payload or missing parent SKU", body = JsonApiDocument),
        (status = 403, description = "Submission rejected", body = JsonApiDocument)
    )
)]
async fn create_product_review<S, R, C>(
    State(state): State<Arc<ReviewsState<S, R, C>>>,
    Path(sku): Path<String>,
    Query(query): Query<ReviewsQuery>,
    headers: HeaderMap,
    JsonApiPayload(attributes): JsonApiPayload<ReviewAttributes>,
) -> ClientResult<RestResponse>
where
    S: ProductStorageClient,
    R: ReviewSearchClient,
    C: ReviewSubmissionClient,
{
    let request = ReviewsRequest {
        parent_abstract_sku: Some(sku),
        review_id: None,
        locale: query.locale(),
        customer_reference: customer_reference(&headers),
        page: None,
    };
    state.creator.create_product_review(&request, attributes).await
}

/// Query parameters of concrete product reads
#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
pub struct ConcreteProductQuery {
    /// Comma-separated relationship names to include, e.g. "product-reviews"
    pub include: Option<String>,
    /// Store locale, e.g. "de_DE"
    pub locale: Option<String>,
}

/// Read a concrete product, optionally expanded with its reviews
#[utoipa::path(
    get,
    path = "/concrete-products/{sku}",
    tag = "Product Reviews",
    params(
        ("sku" = String, Path, description = "Concrete product SKU"),
        ConcreteProductQuery
    ),
    responses(
        (status = 200, description = "Concrete product resource", body = JsonApiDocument),
        (status = 404, description = "Concrete product not found", body = JsonApiDocument)
    )
)]
async fn get_concrete_product<S, R, C>(
    State(state): State<Arc<ReviewsState<S, R, C>>>,
    Path(sku): Path<String>,
    Query(query): Query<ConcreteProductQuery>,
) -> ClientResult<RestResponse>
where
    S: ProductStorageClient,
    R: ReviewSearchClient,
    C: ReviewSubmissionClient,
{
    let locale = query
        .locale
        .clone()
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    let records = state
        .storage_client
        .get_concrete_products_by_skus(std::slice::from_ref(&sku), &locale)
        .await?;
    let Some(record) = records.into_iter().find(|record| record.sku == sku) else {
        return Ok(RestResponse::error(ErrorCode::ConcreteProductNotFound));
    };

    let resource = RestResource::new(
        RESOURCE_CONCRETE_PRODUCTS,
        record.sku.clone(),
        json!({
            "sku": record.sku,
            "id_product_abstract": record.id_product_abstract,
        }),
    );

    let mut batch = [resource];
    if includes_reviews(query.include.as_deref()) {
        state
            .expander
            .add_relationships_by_concrete_sku(&mut batch, &locale)
            .await?;
    }
    let [resource] = batch;

    Ok(RestResponse::single(StatusCode::OK, resource))
}

fn includes_reviews(include: Option<&str>) -> bool {
    include
        .map(|value| {
            value
                .split(',')
                .any(|part| part.trim() == RESOURCE_PRODUCT_REVIEWS)
        })
        .unwrap_or(false)
}

fn customer_reference(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CUSTOMER_REFERENCE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_includes_reviews_parses_comma_separated_list() {
        assert!(includes_reviews(Some("product-reviews")));
        assert!(includes_reviews(Some("product-labels, product-reviews")));
        assert!(!includes_reviews(Some("product-labels")));
        assert!(!includes_reviews(None));
    }

    #[test]
    fn test_page_query_defaults() {
        let query = ReviewsQuery::default();
        assert!(query.page().is_none());
        assert_eq!(query.locale(), "en_US");

        let query = ReviewsQuery {
            page_offset: Some(20),
            page_limit: None,
            locale: Some("de_DE".to_string()),
        };
        let page = query.page().unwrap();
        assert_eq!(page.offset, 20);
        assert_eq!(page.limit, 0);
        assert_eq!(query.locale(), "de_DE");
    }

    #[test]
    fn test_customer_reference_header_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(customer_reference(&headers), None);

        headers.insert(
            CUSTOMER_REFERENCE_HEADER,
            HeaderValue::from_static("DE--21"),
        );
        assert_eq!(customer_reference(&headers), Some("DE--21".to_string()));
    }
}
