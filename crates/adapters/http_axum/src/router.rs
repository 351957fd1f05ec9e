//! Axum router assembly.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use catalog_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`.
/// Requests running longer than `request_timeout` are answered with
/// `408 Request Timeout`. A [`TraceLayer`] logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>, request_timeout: Duration) -> Router
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use catalog_app::services::product_service::ProductService;
    use catalog_domain::error::CatalogError;
    use catalog_domain::id::ProductId;
    use catalog_domain::product::{ListOrder, Product};
    use tower::ServiceExt;

    struct StubProductRepo;

    impl ProductRepository for StubProductRepo {
        async fn create(&self, product: Product) -> Result<Product, CatalogError> {
            Ok(product)
        }
        async fn get_by_id(&self, _id: ProductId) -> Result<Option<Product>, CatalogError> {
            Ok(None)
        }
        async fn get_all(&self, _order: ListOrder) -> Result<Vec<Product>, CatalogError> {
            Ok(vec![])
        }
        async fn update(&self, product: Product) -> Result<Product, CatalogError> {
            Ok(product)
        }
        async fn delete(&self, _id: ProductId) -> Result<(), CatalogError> {
            Ok(())
        }
        async fn count(&self) -> Result<u64, CatalogError> {
            Ok(0)
        }
    }

    /// Repository whose listing never finishes within a short timeout.
    struct SlowProductRepo(Duration);

    impl ProductRepository for SlowProductRepo {
        async fn create(&self, product: Product) -> Result<Product, CatalogError> {
            Ok(product)
        }
        async fn get_by_id(&self, _id: ProductId) -> Result<Option<Product>, CatalogError> {
            Ok(None)
        }
        async fn get_all(&self, _order: ListOrder) -> Result<Vec<Product>, CatalogError> {
            tokio::time::sleep(self.0).await;
            Ok(vec![])
        }
        async fn update(&self, product: Product) -> Result<Product, CatalogError> {
            Ok(product)
        }
        async fn delete(&self, _id: ProductId) -> Result<(), CatalogError> {
            Ok(())
        }
        async fn count(&self) -> Result<u64, CatalogError> {
            Ok(0)
        }
    }

    fn test_app() -> Router {
        build(
            AppState::new(ProductService::new(StubProductRepo)),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_mount_products_under_api_prefix() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_unsupported_method() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_answer_request_timeout_when_handler_is_too_slow() {
        let app = build(
            AppState::new(ProductService::new(SlowProductRepo(Duration::from_millis(500)))),
            Duration::from_millis(1),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
