//! Creation flow for product reviews.

use std::sync::Arc;
use tracing::instrument;

use jsonapi::RestResponse;

use crate::clients::ReviewSubmissionClient;
use crate::config::{RESOURCE_ABSTRACT_PRODUCTS, RESOURCE_PRODUCT_REVIEWS};
use crate::error::{ClientError, ClientResult};
use crate::models::{ReviewAttributes, ReviewSubmission, ReviewsRequest};
use crate::response::ReviewResponseBuilder;

/// Validates the parent reference, submits the review and shapes the
/// created resource.
pub struct ProductReviewCreator<C> {
    response_builder: ReviewResponseBuilder,
    submission_client: Arc<C>,
}

impl<C: ReviewSubmissionClient> ProductReviewCreator<C> {
    pub fn new(submission_client: Arc<C>) -> Self {
        Self {
            response_builder: ReviewResponseBuilder::new(),
            submission_client,
        }
    }

    /// Submit a new review for the parent abstract product.
    ///
    /// A rejection by the submission backend (duplicate review, blocked
    /// customer) is a Forbidden response; only transport faults surface as
    /// errors.
    #[instrument(skip(self, request, attributes), fields(sku = request.parent_abstract_sku.as_deref()))]
    pub async fn create_product_review(
        &self,
        request: &ReviewsRequest,
        attributes: ReviewAttributes,
    ) -> ClientResult<RestResponse> {
        let Some(sku) = request
            .parent_abstract_sku
            .as_deref()
            .filter(|sku| !sku.is_empty())
        else {
            return Ok(self.response_builder.sku_missing_error());
        };

        let submission = ReviewSubmission {
            abstract_sku: sku.to_string(),
            locale_name: request.locale.clone(),
            customer_reference: request.customer_reference.clone().unwrap_or_default(),
            attributes,
        };

        let result = self.submission_client.submit(&submission).await?;
        if !result.is_success {
            return Ok(self.response_builder.submission_failed_error());
        }

        let review = result.review.ok_or_else(|| ClientError::Malformed {
            origin: "submission",
            details: "successful submission carried no review".to_string(),
        })?;

        let mut resource = self.response_builder.review_resource(&review);
        resource.add_link("self", self_link(sku));

        Ok(self.response_builder.created_response(resource))
    }
}

fn self_link(abstract_sku: &str) -> String {
    format!(
        "{}/{}/{}",
        RESOURCE_ABSTRACT_PRODUCTS, abstract_sku, RESOURCE_PRODUCT_REVIEWS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use jsonapi::document::PrimaryData;

    use crate::clients::MockReviewSubmissionClient;
    use crate::models::{ProductReview, ReviewSubmissionResult};

    fn attributes() -> ReviewAttributes {
        ReviewAttributes {
            rating: 5,
            nickname: "ana".to_string(),
            summary: "Excellent".to_string(),
            description: "Would buy again.".to_string(),
        }
    }

    fn request(sku: Option<&str>) -> ReviewsRequest {
        ReviewsRequest {
            parent_abstract_sku: sku.map(String::from),
            review_id: None,
            locale: "de_DE".to_string(),
            customer_reference: Some("DE--21".to_string()),
            page: None,
        }
    }

    #[tokio::test]
    async fn test_missing_parent_sku_is_bad_request() {
        let creator = ProductReviewCreator::new(Arc::new(MockReviewSubmissionClient::new()));

        let response = creator
            .create_product_review(&request(None), attributes())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), Some("ABSTRACT_PRODUCT_SKU_MISSING"));
    }

    #[tokio::test]
    async fn test_rejected_submission_is_forbidden_without_resource() {
        let mut client = MockReviewSubmissionClient::new();
        client.expect_submit().returning(|_| {
            Ok(ReviewSubmissionResult {
                is_success: false,
                review: None,
            })
        });

        let creator = ProductReviewCreator::new(Arc::new(client));
        let response = creator
            .create_product_review(&request(Some("42")), attributes())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.document().data.is_none());
    }

    #[tokio::test]
    async fn test_successful_creation_is_accepted_with_self_link() {
        let mut client = MockReviewSubmissionClient::new();
        client
            .expect_submit()
            .withf(|submission: &ReviewSubmission| {
                submission.abstract_sku == "42"
                    && submission.locale_name == "de_DE"
                    && submission.customer_reference == "DE--21"
            })
            .returning(|submission| {
                Ok(ReviewSubmissionResult {
                    is_success: true,
                    review: Some(ProductReview {
                        id_product_review: 55,
                        id_product_abstract: 42,
                        rating: submission.attributes.rating,
                        nickname: submission.attributes.nickname.clone(),
                        summary: submission.attributes.summary.clone(),
                        description: submission.attributes.description.clone(),
                    }),
                })
            });

        let creator = ProductReviewCreator::new(Arc::new(client));
        let response = creator
            .create_product_review(&request(Some("42")), attributes())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        match response.document().data.as_ref().unwrap() {
            PrimaryData::Single(resource) => {
                assert_eq!(resource.resource_type, "product-reviews");
                assert_eq!(resource.id, "55");
                assert_eq!(
                    resource.links["self"],
                    "abstract-products/42/product-reviews"
                );
                assert_eq!(resource.attributes["nickname"], "ana");
            }
            PrimaryData::Collection(_) => panic!("expected a single resource"),
        }
    }

    #[tokio::test]
    async fn test_success_without_review_payload_is_a_fault() {
        let mut client = MockReviewSubmissionClient::new();
        client.expect_submit().returning(|_| {
            Ok(ReviewSubmissionResult {
                is_success: true,
                review: None,
            })
        });

        let creator = ProductReviewCreator::new(Arc::new(client));
        let result = creator
            .create_product_review(&request(Some("42")), attributes())
            .await;

        assert!(matches!(result, Err(ClientError::Malformed { .. })));
    }
}
