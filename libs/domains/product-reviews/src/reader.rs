//! Read flows for product reviews.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use jsonapi::{RestResource, RestResponse};

use crate::clients::{ProductStorageClient, ReviewSearchClient};
use crate::config::ProductReviewsConfig;
use crate::error::ClientResult;
use crate::models::{PageParams, ReviewsRequest};
use crate::response::ReviewResponseBuilder;

/// Orchestrates review reads: parent resolution, search query, response
/// shaping.
pub struct ProductReviewReader<S, R> {
    response_builder: ReviewResponseBuilder,
    storage_client: Arc<S>,
    review_search_client: Arc<R>,
    config: ProductReviewsConfig,
}

impl<S: ProductStorageClient, R: ReviewSearchClient> ProductReviewReader<S, R> {
    pub fn new(
        storage_client: Arc<S>,
        review_search_client: Arc<R>,
        config: ProductReviewsConfig,
    ) -> Self {
        Self {
            response_builder: ReviewResponseBuilder::new(),
            storage_client,
            review_search_client,
            config,
        }
    }

    /// Paginated reviews of the parent abstract product.
    ///
    /// Reading a single review by id is not supported; requests carrying a
    /// review id get a NotImplemented error response.
    #[instrument(skip(self, request), fields(sku = request.parent_abstract_sku.as_deref()))]
    pub async fn get_product_reviews(&self, request: &ReviewsRequest) -> ClientResult<RestResponse> {
        if request.review_id.is_some() {
            return Ok(self.response_builder.not_implemented_error());
        }

        let Some(sku) = request
            .parent_abstract_sku
            .as_deref()
            .filter(|sku| !sku.is_empty())
        else {
            return Ok(self.response_builder.sku_missing_error());
        };

        let Some(abstract_product) = self
            .storage_client
            .find_abstract_product_by_sku(sku, &request.locale)
            .await?
        else {
            return Ok(self.response_builder.abstract_product_not_found_error());
        };

        let page = self.page_params(request);
        let result = self
            .review_search_client
            .find_reviews(abstract_product.id_product_abstract, &page)
            .await?;

        Ok(self
            .response_builder
            .collection_response(result.num_found, page.limit, &result.reviews))
    }

    /// Review resource collections for a batch of abstract product ids,
    /// fetched with a single bulk query. Every requested id is present in
    /// the result, with an empty collection when it has no reviews.
    #[instrument(skip(self))]
    pub async fn get_reviews_by_abstract_ids(
        &self,
        page: &PageParams,
        id_product_abstracts: &[i64],
    ) -> ClientResult<HashMap<i64, Vec<RestResource>>> {
        let result = self
            .review_search_client
            .find_reviews_bulk(id_product_abstracts, page)
            .await?;

        let mut grouped: HashMap<i64, Vec<_>> = HashMap::new();
        for review in result.reviews {
            grouped
                .entry(review.id_product_abstract)
                .or_default()
                .push(review);
        }

        Ok(self
            .response_builder
            .resource_collections_by_abstract_id(grouped, id_product_abstracts))
    }

    /// Effective pagination for a request: a missing page means offset 0 and
    /// the configured default limit; a zero limit falls back to the default
    /// as well.
    fn page_params(&self, request: &ReviewsRequest) -> PageParams {
        match request.page {
            Some(page) => PageParams {
                offset: page.offset,
                limit: if page.limit > 0 {
                    page.limit
                } else {
                    self.config.default_reviews_per_page
                },
            },
            None => PageParams {
                offset: 0,
                limit: self.config.default_reviews_per_page,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::clients::{MockProductStorageClient, MockReviewSearchClient};
    use crate::models::{AbstractProductRecord, ProductReview, ReviewSearchPage};

    fn request(sku: Option<&str>) -> ReviewsRequest {
        ReviewsRequest {
            parent_abstract_sku: sku.map(String::from),
            review_id: None,
            locale: "en_US".to_string(),
            customer_reference: None,
            page: None,
        }
    }

    fn review(id: i64, abstract_id: i64) -> ProductReview {
        ProductReview {
            id_product_review: id,
            id_product_abstract: abstract_id,
            rating: 5,
            nickname: "sam".to_string(),
            summary: "Loved it".to_string(),
            description: String::new(),
        }
    }

    fn reader(
        storage: MockProductStorageClient,
        search: MockReviewSearchClient,
    ) -> ProductReviewReader<MockProductStorageClient, MockReviewSearchClient> {
        ProductReviewReader::new(
            Arc::new(storage),
            Arc::new(search),
            ProductReviewsConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_single_review_read_is_not_implemented() {
        let reader = reader(
            MockProductStorageClient::new(),
            MockReviewSearchClient::new(),
        );

        let mut req = request(Some("001"));
        req.review_id = Some("17".to_string());

        let response = reader.get_product_reviews(&req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.error_code(), Some("NOT_IMPLEMENTED"));
    }

    #[tokio::test]
    async fn test_missing_parent_sku_is_bad_request() {
        let reader = reader(
            MockProductStorageClient::new(),
            MockReviewSearchClient::new(),
        );

        let response = reader.get_product_reviews(&request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), Some("ABSTRACT_PRODUCT_SKU_MISSING"));
    }

    #[tokio::test]
    async fn test_empty_parent_sku_is_bad_request() {
        let reader = reader(
            MockProductStorageClient::new(),
            MockReviewSearchClient::new(),
        );

        let response = reader.get_product_reviews(&request(Some(""))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unresolved_sku_is_not_found() {
        let mut storage = MockProductStorageClient::new();
        storage
            .expect_find_abstract_product_by_sku()
            .withf(|sku, locale| sku == "missing" && locale == "en_US")
            .returning(|_, _| Ok(None));

        let reader = reader(storage, MockReviewSearchClient::new());

        let response = reader
            .get_product_reviews(&request(Some("missing")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), Some("ABSTRACT_PRODUCT_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_defaults_pagination_when_request_has_none() {
        let mut storage = MockProductStorageClient::new();
        storage
            .expect_find_abstract_product_by_sku()
            .returning(|sku, _| {
                Ok(Some(AbstractProductRecord {
                    id_product_abstract: 100,
                    sku: sku.to_string(),
                }))
            });

        let mut search = MockReviewSearchClient::new();
        search
            .expect_find_reviews()
            .withf(|id, page| *id == 100 && page.offset == 0 && page.limit == 10)
            .returning(|_, _| {
                Ok(ReviewSearchPage {
                    reviews: vec![review(1, 100)],
                    num_found: 37,
                })
            });

        let reader = reader(storage, search);
        let response = reader
            .get_product_reviews(&request(Some("001")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.document().meta.unwrap().total_pages, 4);
    }

    #[tokio::test]
    async fn test_zero_limit_falls_back_to_default() {
        let mut storage = MockProductStorageClient::new();
        storage
            .expect_find_abstract_product_by_sku()
            .returning(|sku, _| {
                Ok(Some(AbstractProductRecord {
                    id_product_abstract: 100,
                    sku: sku.to_string(),
                }))
            });

        let mut search = MockReviewSearchClient::new();
        search
            .expect_find_reviews()
            .withf(|_, page| page.offset == 20 && page.limit == 10)
            .returning(|_, _| {
                Ok(ReviewSearchPage {
                    reviews: Vec::new(),
                    num_found: 0,
                })
            });

        let reader = reader(storage, search);
        let mut req = request(Some("001"));
        req.page = Some(PageParams {
            offset: 20,
            limit: 0,
        });

        let response = reader.get_product_reviews(&req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bulk_read_groups_by_abstract_id_and_covers_all_ids() {
        let mut search = MockReviewSearchClient::new();
        search
            .expect_find_reviews_bulk()
            .withf(|ids, page| ids == [100, 200, 300] && page.offset == 0)
            .returning(|_, _| {
                Ok(ReviewSearchPage {
                    reviews: vec![review(1, 100), review(2, 200), review(3, 200)],
                    num_found: 3,
                })
            });

        let reader = reader(MockProductStorageClient::new(), search);
        let page = PageParams {
            offset: 0,
            limit: 100,
        };

        let collections = reader
            .get_reviews_by_abstract_ids(&page, &[100, 200, 300])
            .await
            .unwrap();

        assert_eq!(collections.len(), 3);
        assert_eq!(collections[&100].len(), 1);
        assert_eq!(collections[&200].len(), 2);
        assert!(collections[&300].is_empty());
    }
}
