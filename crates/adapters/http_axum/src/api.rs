//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod products;

use axum::Router;
use axum::routing::get;

use catalog_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/products",
            get(products::list::<R>)
                .post(products::create::<R>)
                .put(products::update::<R>),
        )
        .route(
            "/products/{id}",
            get(products::get::<R>).delete(products::delete::<R>),
        )
}
