//! JSON:API resource and document types.
//!
//! A [`RestResource`] is the in-process representation handed around between
//! processors: it may carry fully materialized related resources attached via
//! [`RestResource::add_relationship`]. When a document is assembled the
//! related resources are rendered as relationship linkage (`type` + `id`)
//! and hoisted into the document's `included` section, deduplicated by
//! identifier.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

/// The JSON:API media type, used as Content-Type on every response.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Identifier of a resource: its type and id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

/// A typed, identified resource under construction.
///
/// Relationships hold whole related resources until document assembly; the
/// wire split into linkage plus `included` happens in
/// [`JsonApiDocument::from_resources`].
#[derive(Debug, Clone)]
pub struct RestResource {
    resource_type: String,
    id: String,
    attributes: Value,
    links: BTreeMap<String, String>,
    relationships: Vec<RestResource>,
}

impl RestResource {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>, attributes: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes,
            links: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &Value {
        &self.attributes
    }

    pub fn add_link(&mut self, name: impl Into<String>, href: impl Into<String>) {
        self.links.insert(name.into(), href.into());
    }

    /// Attach a related resource. Repeated calls append; nothing is
    /// deduplicated at this level.
    pub fn add_relationship(&mut self, related: RestResource) {
        self.relationships.push(related);
    }

    pub fn relationships(&self) -> &[RestResource] {
        &self.relationships
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }
}

/// Relationship linkage as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Relationship {
    pub data: Vec<ResourceIdentifier>,
}

/// A resource object as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[schema(value_type = Object)]
    pub attributes: Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub relationships: BTreeMap<String, Relationship>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub links: BTreeMap<String, String>,
}

/// Primary data of a document: a single resource or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PrimaryData {
    Single(ResourceObject),
    Collection(Vec<ResourceObject>),
}

/// Pagination metadata attached to collection responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub total_items: u64,
    pub items_per_page: u64,
    pub total_pages: u64,
}

impl PageMeta {
    /// Page count is `ceil(total_items / items_per_page)`; a zero limit
    /// yields zero pages.
    pub fn new(total_items: u64, items_per_page: u64) -> Self {
        let total_pages = if items_per_page > 0 {
            total_items.div_ceil(items_per_page)
        } else {
            0
        };
        Self {
            total_items,
            items_per_page,
            total_pages,
        }
    }
}

/// A complete JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JsonApiDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PrimaryData>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub included: Vec<ResourceObject>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<crate::errors::JsonApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl JsonApiDocument {
    /// Assemble a collection document, splitting attached relationships into
    /// linkage and `included` entries.
    pub fn from_resources(resources: Vec<RestResource>, meta: Option<PageMeta>) -> Self {
        let mut included = Vec::new();
        let mut seen = BTreeSet::new();
        let data = resources
            .into_iter()
            .map(|resource| render(resource, &mut included, &mut seen))
            .collect();

        Self {
            data: Some(PrimaryData::Collection(data)),
            included,
            errors: Vec::new(),
            meta,
        }
    }

    /// Assemble a single-resource document.
    pub fn from_resource(resource: RestResource) -> Self {
        let mut included = Vec::new();
        let mut seen = BTreeSet::new();
        let data = render(resource, &mut included, &mut seen);

        Self {
            data: Some(PrimaryData::Single(data)),
            included,
            errors: Vec::new(),
            meta: None,
        }
    }

    pub fn from_errors(errors: Vec<crate::errors::JsonApiError>) -> Self {
        Self {
            data: None,
            included: Vec::new(),
            errors,
            meta: None,
        }
    }
}

fn render(
    resource: RestResource,
    included: &mut Vec<ResourceObject>,
    seen: &mut BTreeSet<ResourceIdentifier>,
) -> ResourceObject {
    let mut relationships: BTreeMap<String, Relationship> = BTreeMap::new();

    for related in resource.relationships() {
        relationships
            .entry(related.resource_type().to_string())
            .or_default()
            .data
            .push(related.identifier());

        if seen.insert(related.identifier()) {
            // Related resources carry no nested relationships of their own.
            included.push(ResourceObject {
                resource_type: related.resource_type().to_string(),
                id: related.id().to_string(),
                attributes: related.attributes().clone(),
                relationships: BTreeMap::new(),
                links: related.links.clone(),
            });
        }
    }

    ResourceObject {
        resource_type: resource.resource_type,
        id: resource.id,
        attributes: resource.attributes,
        relationships,
        links: resource.links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(id: &str) -> RestResource {
        RestResource::new("product-reviews", id, json!({"rating": 4}))
    }

    #[test]
    fn test_page_meta_rounds_up() {
        assert_eq!(PageMeta::new(37, 10).total_pages, 4);
        assert_eq!(PageMeta::new(40, 10).total_pages, 4);
        assert_eq!(PageMeta::new(41, 10).total_pages, 5);
        assert_eq!(PageMeta::new(0, 10).total_pages, 0);
    }

    #[test]
    fn test_page_meta_zero_limit() {
        assert_eq!(PageMeta::new(37, 0).total_pages, 0);
    }

    #[test]
    fn test_single_document_shape() {
        let mut resource = RestResource::new("concrete-products", "sku-1", json!({"sku": "sku-1"}));
        resource.add_link("self", "concrete-products/sku-1");

        let value = serde_json::to_value(JsonApiDocument::from_resource(resource)).unwrap();

        assert_eq!(value["data"]["type"], "concrete-products");
        assert_eq!(value["data"]["id"], "sku-1");
        assert_eq!(value["data"]["links"]["self"], "concrete-products/sku-1");
        assert!(value.get("included").is_none());
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_relationships_are_rendered_as_linkage_plus_included() {
        let mut resource = RestResource::new("concrete-products", "sku-1", json!({}));
        resource.add_relationship(review("11"));
        resource.add_relationship(review("12"));

        let value = serde_json::to_value(JsonApiDocument::from_resource(resource)).unwrap();

        let linkage = &value["data"]["relationships"]["product-reviews"]["data"];
        assert_eq!(linkage.as_array().unwrap().len(), 2);
        assert_eq!(linkage[0]["type"], "product-reviews");
        assert_eq!(linkage[0]["id"], "11");
        assert_eq!(value["included"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_included_deduplicates_shared_resources() {
        let mut first = RestResource::new("concrete-products", "sku-1", json!({}));
        let mut second = RestResource::new("concrete-products", "sku-2", json!({}));
        first.add_relationship(review("11"));
        second.add_relationship(review("11"));

        let document = JsonApiDocument::from_resources(vec![first, second], None);

        assert_eq!(document.included.len(), 1);
    }

    #[test]
    fn test_duplicate_relationship_keeps_duplicate_linkage() {
        // A resource matched twice keeps both linkage entries; only the
        // included entry is deduplicated.
        let mut resource = RestResource::new("concrete-products", "sku-1", json!({}));
        resource.add_relationship(review("11"));
        resource.add_relationship(review("11"));

        let value = serde_json::to_value(JsonApiDocument::from_resource(resource)).unwrap();

        let linkage = &value["data"]["relationships"]["product-reviews"]["data"];
        assert_eq!(linkage.as_array().unwrap().len(), 2);
        assert_eq!(value["included"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_collection_document_with_meta() {
        let document =
            JsonApiDocument::from_resources(vec![review("1"), review("2")], Some(PageMeta::new(2, 10)));
        let value = serde_json::to_value(document).unwrap();

        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["meta"]["total_pages"], 1);
    }
}
