//! Integration tests for Bazaar.
//!
//! Each [`TestContext`] starts two servers on ephemeral ports: a fake catalog
//! API serving [`fake_products`], and the storefront app pointed at it. The
//! HTTP client keeps cookies, so one context is one visitor session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router, extract::Path, http::StatusCode as HttpStatus, response::IntoResponse,
    routing::get,
};
use bazaar_storefront::catalog::{CatalogClient, load_catalog, load_catalog_async};
use bazaar_storefront::config::{CatalogConfig, StorefrontConfig};
use bazaar_storefront::routes;
use bazaar_storefront::search::SearchIndex;
use bazaar_storefront::state::AppState;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use url::Url;

/// The catalog served by the fake API.
///
/// Ten products: three for the "red" search scenario, six tees (more than a
/// dropdown shows), and one discounted jacket.
#[must_use]
pub fn fake_products() -> Value {
    let mut products = vec![
        json!({"id": 1, "title": "Red Shoe", "price": 10, "description": "Running shoe",
               "category": "footwear", "image": "https://img.test/1.jpg",
               "rating": {"rate": 4.1, "count": 12}}),
        json!({"id": 2, "title": "Blue Hat", "price": 5.5, "category": "hats",
               "image": "https://img.test/2.jpg"}),
        json!({"id": 3, "title": "Red Hat", "price": 7.25, "description": "Wool",
               "category": "hats", "image": "https://img.test/3.jpg"}),
    ];
    for id in 4..=9 {
        products.push(json!({
            "id": id, "title": format!("Tee {id}"), "price": 12,
            "description": "Cotton tee", "category": "shirts",
            "image": format!("https://img.test/{id}.jpg")
        }));
    }
    products.push(json!({
        "id": 10, "title": "Winter Jacket", "price": 80, "description": "Warm layer",
        "category": "outerwear", "discountPercentage": 20,
        "thumbnail": "https://img.test/10-thumb.jpg",
        "images": ["https://img.test/10-a.jpg", "https://img.test/10-b.jpg"]
    }));
    Value::Array(products)
}

/// Category names served by the fake API.
pub const FAKE_CATEGORIES: [&str; 4] = ["footwear", "hats", "shirts", "outerwear"];

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });
    addr
}

/// Start the fake catalog API; returns its base URL.
pub async fn spawn_fake_catalog() -> Url {
    async fn products() -> Json<Value> {
        Json(fake_products())
    }

    async fn product(Path(id): Path<i64>) -> impl IntoResponse {
        // Unknown ids come back as 200 with an empty body, like the real API.
        fake_products()
            .as_array()
            .and_then(|all| all.iter().find(|p| p["id"] == id).cloned())
            .map_or_else(String::new, |p| p.to_string())
    }

    async fn categories() -> Json<[&'static str; 4]> {
        Json(FAKE_CATEGORIES)
    }

    let router = Router::new()
        .route("/products", get(products))
        .route("/products/categories", get(categories))
        .route("/products/{id}", get(product));

    let addr = serve(router).await;
    Url::parse(&format!("http://{addr}")).expect("Invalid fake catalog URL")
}

/// Start a catalog API that answers every request with a 500.
pub async fn spawn_failing_catalog() -> Url {
    async fn unavailable() -> impl IntoResponse {
        (HttpStatus::INTERNAL_SERVER_ERROR, "catalog unavailable")
    }

    let addr = serve(Router::new().fallback(unavailable)).await;
    Url::parse(&format!("http://{addr}")).expect("Invalid failing catalog URL")
}

/// A running storefront plus a cookie-carrying client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
}

impl TestContext {
    /// Storefront with the catalog snapshot loaded.
    pub async fn new() -> Self {
        let ctx = Self::not_ready().await;
        load_catalog(ctx.state.search(), ctx.state.catalog())
            .await
            .expect("Failed to load fake catalog");
        ctx
    }

    /// Storefront whose catalog snapshot has not been loaded yet.
    pub async fn not_ready() -> Self {
        Self::start(spawn_fake_catalog().await).await
    }

    /// Storefront whose startup catalog load failed.
    pub async fn catalog_down() -> Self {
        let ctx = Self::start(spawn_failing_catalog().await).await;
        load_catalog_async(ctx.state.search().clone(), ctx.state.catalog().clone())
            .await
            .expect("Catalog load task panicked");
        ctx
    }

    async fn start(api_url: Url) -> Self {
        let config = StorefrontConfig {
            catalog: CatalogConfig {
                api_url,
                cache_ttl: Duration::from_secs(60),
            },
            ..StorefrontConfig::default()
        };
        let catalog = CatalogClient::new(&config.catalog);
        let state = AppState::with_index(config, catalog, SearchIndex::new());

        let addr = serve(routes::app(state.clone())).await;

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// A second visitor against the same storefront.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            client: new_client(),
            base_url: self.base_url.clone(),
            state: self.state.clone(),
        }
    }

    /// GET `path`, returning the status and JSON body (`Null` if not JSON).
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET failed");
        read(response).await
    }

    /// POST `body` as JSON to `path`, returning the status and JSON body.
    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("POST failed");
        read(response).await
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.text().await.expect("Failed to read response");
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

/// Product ids in a JSON array of products.
#[must_use]
pub fn ids(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
        .unwrap_or_default()
}
