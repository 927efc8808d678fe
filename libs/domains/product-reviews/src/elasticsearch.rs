//! Elasticsearch-backed review search.
//!
//! Reviews are indexed one document per review with an
//! `id_product_abstract` keyword field; both the single-product and the
//! bulk query are the same terms filter with a pagination window.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use core_config::{env_or_default, env_required, ConfigError, FromEnv};

use crate::clients::ReviewSearchClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{PageParams, ProductReview, ReviewSearchPage};

/// Connection settings of the review search index.
#[derive(Clone, Debug)]
pub struct ElasticsearchConfig {
    /// Base URL of the Elasticsearch cluster (required)
    pub base_url: String,
    /// Index holding review documents
    pub index: String,
}

impl FromEnv for ElasticsearchConfig {
    /// Reads from environment variables:
    /// - ELASTICSEARCH_URL (required)
    /// - ELASTICSEARCH_REVIEW_INDEX: defaults to "product_review"
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_required("ELASTICSEARCH_URL")?,
            index: env_or_default("ELASTICSEARCH_REVIEW_INDEX", "product_review"),
        })
    }
}

/// Review search client over the Elasticsearch HTTP API.
pub struct ElasticsearchReviewSearch {
    client: Client,
    search_url: String,
}

impl ElasticsearchReviewSearch {
    pub fn new(client: Client, config: &ElasticsearchConfig) -> Self {
        Self {
            client,
            search_url: format!(
                "{}/{}/_search",
                config.base_url.trim_end_matches('/'),
                config.index
            ),
        }
    }

    async fn execute(&self, ids: &[i64], page: &PageParams) -> ClientResult<ReviewSearchPage> {
        let query = build_query(ids, page);
        debug!("Executing review search against {}", self.search_url);

        let response = self
            .client
            .post(&self.search_url)
            .json(&query)
            .send()
            .await
            .map_err(|e| ClientError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Search(format!(
                "search returned status {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Search(e.to_string()))?;
        parse_page(&body)
    }
}

#[async_trait]
impl ReviewSearchClient for ElasticsearchReviewSearch {
    async fn find_reviews(
        &self,
        id_product_abstract: i64,
        page: &PageParams,
    ) -> ClientResult<ReviewSearchPage> {
        self.execute(&[id_product_abstract], page).await
    }

    async fn find_reviews_bulk(
        &self,
        id_product_abstracts: &[i64],
        page: &PageParams,
    ) -> ClientResult<ReviewSearchPage> {
        self.execute(id_product_abstracts, page).await
    }
}

fn build_query(ids: &[i64], page: &PageParams) -> Value {
    json!({
        "from": page.offset,
        "size": page.limit,
        "query": {
            "bool": {
                "filter": [
                    { "terms": { "id_product_abstract": ids } }
                ]
            }
        },
        "sort": [
            { "id_product_review": { "order": "desc" } }
        ]
    })
}

fn parse_page(body: &Value) -> ClientResult<ReviewSearchPage> {
    let num_found = body["hits"]["total"]["value"]
        .as_u64()
        .ok_or_else(|| ClientError::Malformed {
            origin: "search",
            details: "missing hits.total.value".to_string(),
        })?;

    let hits = body["hits"]["hits"]
        .as_array()
        .ok_or_else(|| ClientError::Malformed {
            origin: "search",
            details: "missing hits.hits".to_string(),
        })?;

    let reviews = hits
        .iter()
        .map(|hit| {
            serde_json::from_value::<ProductReview>(hit["_source"].clone()).map_err(|e| {
                ClientError::Malformed {
                    origin: "search",
                    details: e.to_string(),
                }
            })
        })
        .collect::<ClientResult<Vec<_>>>()?;

    Ok(ReviewSearchPage { reviews, num_found })
}
