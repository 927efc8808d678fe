use axum::Router;
use std::sync::Arc;

use domain_product_reviews::{
    handlers, ProductReviewCreator, ProductReviewReader, ReviewRelationshipExpander, ReviewsState,
};

use crate::state::AppState;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    let reader = Arc::new(ProductReviewReader::new(
        Arc::clone(&state.storage),
        Arc::clone(&state.search),
        state.config.reviews,
    ));
    let creator = ProductReviewCreator::new(Arc::clone(&state.gateway));
    let expander = ReviewRelationshipExpander::new(
        Arc::clone(&reader),
        Arc::clone(&state.storage),
        state.config.reviews,
    );

    handlers::router(ReviewsState {
        reader,
        creator,
        expander,
        storage_client: Arc::clone(&state.storage),
    })
}
