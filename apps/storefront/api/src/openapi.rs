use utoipa::OpenApi;

/// Combined API documentation served by the docs endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "JSON:API endpoints for product reviews"
    ),
    nest(
        (path = "/api", api = domain_product_reviews::ApiDoc)
    )
)]
pub struct ApiDoc;
