//! JSON REST handlers for products.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_app::ports::ProductRepository;
use catalog_domain::error::{CatalogError, ValidationError};
use catalog_domain::id::ProductId;
use catalog_domain::product::Product;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a product.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub product_name: String,
    pub unit_price: Decimal,
}

impl ProductRequest {
    fn into_product(self) -> Result<Product, CatalogError> {
        let builder = Product::builder()
            .product_name(self.product_name)
            .unit_price(self.unit_price);
        match self.id {
            Some(id) => builder.id(id),
            None => builder,
        }
        .build()
    }
}

/// Body extractor result; `null` deserializes to `None`.
type Payload = Result<Json<Option<ProductRequest>>, JsonRejection>;

/// Unwrap a request body, rejecting `null` and anything unparseable.
fn require_body(payload: Payload) -> Result<Product, CatalogError> {
    match payload {
        Ok(Json(Some(req))) => req.into_product(),
        Ok(Json(None)) => Err(ValidationError::MissingBody.into()),
        Err(rejection) => Err(ValidationError::MalformedBody(rejection.body_text()).into()),
    }
}

fn parse_id(raw: &str) -> Result<ProductId, CatalogError> {
    raw.parse::<ProductId>()
        .map_err(|_| CatalogError::from(ValidationError::InvalidId(raw.to_string())))
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Product>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    /// The product, or JSON `null` when absent.
    Ok(Json<Option<Product>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create and update endpoints.
pub enum SaveResponse {
    Ok(Json<Product>),
}

impl IntoResponse for SaveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

/// `GET /api/products`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let products = state.product_service.list_products().await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `GET /api/products/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let product = state.product_service.find_product(product_id).await?;
    Ok(GetResponse::Ok(Json(product)))
}

/// `POST /api/products`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Payload,
) -> Result<SaveResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = require_body(payload)?;
    let created = state.product_service.create_product(product).await?;
    Ok(SaveResponse::Ok(Json(created)))
}

/// `PUT /api/products`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    payload: Payload,
) -> Result<SaveResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = require_body(payload)?;
    let updated = state.product_service.update_product(product).await?;
    Ok(SaveResponse::Ok(Json(updated)))
}

/// `DELETE /api/products/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    state.product_service.delete_product(product_id).await?;
    Ok(DeleteResponse::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::Request;
    use catalog_app::services::product_service::ProductService;
    use catalog_domain::error::NotFoundError;
    use catalog_domain::product::ListOrder;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Single-row fake that records how often it was called.
    #[derive(Default)]
    struct RecordingRepo {
        calls: Arc<AtomicUsize>,
        row: Mutex<Option<Product>>,
    }

    impl RecordingRepo {
        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl ProductRepository for RecordingRepo {
        async fn create(&self, product: Product) -> Result<Product, CatalogError> {
            self.touch();
            *self.row.lock().unwrap() = Some(product.clone());
            Ok(product)
        }
        async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
            self.touch();
            Ok(self.row.lock().unwrap().clone().filter(|p| p.id == id))
        }
        async fn get_all(&self, _order: ListOrder) -> Result<Vec<Product>, CatalogError> {
            self.touch();
            Ok(self.row.lock().unwrap().clone().into_iter().collect())
        }
        async fn update(&self, product: Product) -> Result<Product, CatalogError> {
            self.touch();
            Err(NotFoundError {
                entity: "Product",
                id: product.id.to_string(),
            }
            .into())
        }
        async fn delete(&self, _id: ProductId) -> Result<(), CatalogError> {
            self.touch();
            Ok(())
        }
        async fn count(&self) -> Result<u64, CatalogError> {
            self.touch();
            Ok(0)
        }
    }

    fn app() -> (Router, Arc<AtomicUsize>) {
        let repo = RecordingRepo::default();
        let calls = Arc::clone(&repo.calls);
        let state = AppState::new(ProductService::new(repo));
        let router = Router::new()
            .nest("/api", crate::api::routes())
            .with_state(state);
        (router, calls)
    }

    fn json_request(method: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_reject_null_body_on_create_without_touching_store() {
        let (app, calls) = app();

        let response = app.oneshot(json_request("POST", "null")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let body = body_json(response).await;
        assert_eq!(body["error"], "request body is missing or null");
    }

    #[tokio::test]
    async fn should_reject_null_body_on_update_without_touching_store() {
        let (app, calls) = app();

        let response = app.oneshot(json_request("PUT", "null")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_malformed_body() {
        let (app, calls) = app();

        let response = app
            .oneshot(json_request("POST", r#"{"id":"four","productName":"Tofu"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_body_without_id() {
        let (app, calls) = app();

        let response = app
            .oneshot(json_request(
                "POST",
                r#"{"productName":"Tofu","unitPrice":23.25}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let body = body_json(response).await;
        assert_eq!(body["error"], "product id is required");
    }

    #[tokio::test]
    async fn should_reject_null_id_on_update() {
        let (app, calls) = app();

        let response = app
            .oneshot(json_request(
                "PUT",
                r#"{"id":null,"productName":"Tofu","unitPrice":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_missing_content_type() {
        let (app, _calls) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_echo_created_product() {
        let (app, calls) = app();

        let response = app
            .oneshot(json_request(
                "POST",
                r#"{"id":4,"productName":"Tofu","unitPrice":23.25}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 4);
        assert_eq!(body["productName"], "Tofu");
        assert_eq!(body["unitPrice"].as_f64(), Some(23.25));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_return_null_when_product_missing() {
        let (app, _calls) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.is_null());
    }

    #[tokio::test]
    async fn should_reject_non_numeric_id() {
        let (app, calls) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_product() {
        let (app, _calls) = app();

        let response = app
            .oneshot(json_request(
                "PUT",
                r#"{"id":42,"productName":"Ghost","unitPrice":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_empty_ok_on_delete() {
        let (app, _calls) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/products/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
