//! # Backend Trait
//!
//! The seam between the controller and the REST backend. Production uses
//! [`RestBackend`]; controller tests plug in an in-memory fake.

use async_trait::async_trait;
use shopfront_core::{Bill, NewBill, Product, ProductDraft};

use crate::client::{ClientConfig, HttpClient};
use crate::endpoint::bill::BillEndpoint;
use crate::endpoint::product::ProductEndpoint;
use crate::error::RemoteResult;

/// Every backend operation the client performs.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_products(&self) -> RemoteResult<Vec<Product>>;

    async fn create_product(&self, draft: &ProductDraft) -> RemoteResult<Product>;

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> RemoteResult<Product>;

    async fn delete_product(&self, id: &str) -> RemoteResult<()>;

    async fn list_bills(&self) -> RemoteResult<Vec<Bill>>;

    async fn create_bill(&self, bill: &NewBill) -> RemoteResult<Bill>;
}

/// [`Backend`] over HTTP.
///
/// ## Usage
///
/// ```rust,ignore
/// use shopfront_api::{ClientConfig, RestBackend};
///
/// let backend = RestBackend::new(&ClientConfig::new("http://localhost:3001/api"))?;
/// let products = backend.products().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: HttpClient,
}

impl RestBackend {
    pub fn new(config: &ClientConfig) -> RemoteResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn products(&self) -> ProductEndpoint<'_> {
        ProductEndpoint::new(&self.http)
    }

    pub fn bills(&self) -> BillEndpoint<'_> {
        BillEndpoint::new(&self.http)
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_products(&self) -> RemoteResult<Vec<Product>> {
        self.products().list().await
    }

    async fn create_product(&self, draft: &ProductDraft) -> RemoteResult<Product> {
        self.products().create(draft).await
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> RemoteResult<Product> {
        self.products().update(id, draft).await
    }

    async fn delete_product(&self, id: &str) -> RemoteResult<()> {
        self.products().delete(id).await
    }

    async fn list_bills(&self) -> RemoteResult<Vec<Bill>> {
        self.bills().list().await
    }

    async fn create_bill(&self, bill: &NewBill) -> RemoteResult<Bill> {
        self.bills().create(bill).await
    }
}

// =============================================================================
// Tests against an in-process stub backend
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use shopfront_core::{BillItem, Money, PaymentMethod};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Stub {
        products: Arc<Mutex<Vec<Product>>>,
        bills: Arc<Mutex<Vec<Bill>>>,
    }

    async fn list_products(State(stub): State<Stub>) -> Json<Vec<Product>> {
        Json(stub.products.lock().unwrap().clone())
    }

    async fn create_product(
        State(stub): State<Stub>,
        Json(draft): Json<ProductDraft>,
    ) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<Value>)> {
        if draft.id.is_some() {
            return Err((StatusCode::BAD_REQUEST, Json(json!({"error": "id not allowed"}))));
        }
        let mut products = stub.products.lock().unwrap();
        let product = Product {
            id: format!("P{:03}", products.len() + 1),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            colors: draft.colors,
            sizes: draft.sizes,
        };
        products.push(product.clone());
        Ok((StatusCode::CREATED, Json(product)))
    }

    async fn update_product(
        State(stub): State<Stub>,
        Path(id): Path<String>,
        Json(draft): Json<ProductDraft>,
    ) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
        if draft.id.as_deref() != Some(id.as_str()) {
            return Err((StatusCode::BAD_REQUEST, Json(json!({"message": "id mismatch"}))));
        }
        let mut products = stub.products.lock().unwrap();
        let existing = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or((StatusCode::NOT_FOUND, Json(json!({"message": "Product not found"}))))?;
        existing.name = draft.name;
        existing.price = draft.price;
        Ok(Json(existing.clone()))
    }

    async fn delete_product(State(stub): State<Stub>, Path(id): Path<String>) -> StatusCode {
        stub.products.lock().unwrap().retain(|p| p.id != id);
        StatusCode::NO_CONTENT
    }

    async fn list_bills(State(stub): State<Stub>) -> Json<Vec<Bill>> {
        Json(stub.bills.lock().unwrap().clone())
    }

    async fn create_bill(State(stub): State<Stub>, Json(new): Json<NewBill>) -> Json<Bill> {
        let bill = Bill {
            id: "B1".to_string(),
            items: new.items,
            discount_amount: new.discount_amount,
            payment_method: new.payment_method,
            sub_total: new.sub_total,
            grand_total: new.grand_total,
            created_at: chrono::Utc::now(),
        };
        stub.bills.lock().unwrap().push(bill.clone());
        Json(bill)
    }

    async fn spawn(router: Router) -> RestBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        RestBackend::new(&ClientConfig::new(format!("http://{}/api", addr))).unwrap()
    }

    async fn spawn_stub() -> RestBackend {
        let api = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", put(update_product).delete(delete_product))
            .route("/bills", get(list_bills).post(create_bill))
            .with_state(Stub::default());
        spawn(Router::new().nest("/api", api)).await
    }

    fn draft(name: &str, price_major: i64) -> ProductDraft {
        ProductDraft {
            id: None,
            name: name.to_string(),
            category: "Shirts".to_string(),
            price: Money::from_major_minor(price_major, 0),
            colors: "Blue".to_string(),
            sizes: "M, L".to_string(),
        }
    }

    #[tokio::test]
    async fn test_product_crud() {
        let backend = spawn_stub().await;
        assert!(backend.list_products().await.unwrap().is_empty());

        let created = backend.create_product(&draft("Oxford Shirt", 899)).await.unwrap();
        assert_eq!(created.id, "P001");
        assert_eq!(created.price.cents(), 89900);

        let updated = backend
            .update_product(&created.id, &draft("Oxford Shirt Slim", 949))
            .await
            .unwrap();
        assert_eq!(updated.name, "Oxford Shirt Slim");

        backend.delete_product(&created.id).await.unwrap();
        assert!(backend.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_error_carries_body_message() {
        let backend = spawn_stub().await;
        let err = backend
            .update_product("P404", &draft("Ghost", 1))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_status_text() {
        let router = Router::new().route(
            "/api/products",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let backend = spawn(router).await;

        let err = backend.list_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[tokio::test]
    async fn test_null_list_is_empty() {
        let router = Router::new().route("/api/bills", get(|| async { Json(Value::Null) }));
        let backend = spawn(router).await;
        assert!(backend.list_bills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_bill() {
        let backend = spawn_stub().await;
        let new_bill = NewBill {
            items: vec![BillItem {
                product_id: "P001".to_string(),
                product_name: "Oxford Shirt".to_string(),
                quantity: 2,
                price: Money::from_major_minor(100, 0),
            }],
            discount_amount: Money::from_major_minor(30, 0),
            payment_method: PaymentMethod::GPay,
            sub_total: Money::from_major_minor(200, 0),
            grand_total: Money::from_major_minor(170, 0),
        };

        let bill = backend.create_bill(&new_bill).await.unwrap();
        assert_eq!(bill.id, "B1");
        assert_eq!(bill.grand_total.cents(), 17000);
        assert_eq!(backend.list_bills().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            RestBackend::new(&ClientConfig::new(format!("http://{}/api", addr))).unwrap();
        let err = backend.list_products().await.unwrap_err();
        assert!(matches!(err, RemoteError::Network(_)));
    }
}
