//! Shared fixtures: an in-process catalog backend and a recording share platform.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use storefront::catalog::CatalogClient;
use storefront::error::PlatformShareError;
use storefront::models::Product;
use storefront::share::{ImageDownloader, ShareComposer, ShareFlow, SharePlatform, ShareRequest};

pub const USER_EMAIL: &str = "asha@example.com";
pub const USER_PASSWORD: &str = "secret";
pub const TAKEN_EMAIL: &str = "taken@example.com";

struct MockState {
    base_url: String,
    image_requests: AtomicUsize,
}

/// A catalog backend served on 127.0.0.1 for the duration of a test.
pub struct MockCatalog {
    state: Arc<MockState>,
}

impl MockCatalog {
    pub fn base_url(&self) -> &str {
        &self.state.base_url
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(self.base_url())
    }

    /// Client for a backend that answers every call with 502.
    pub fn broken_client(&self) -> CatalogClient {
        CatalogClient::new(format!("{}/broken", self.base_url()))
    }

    pub fn image_requests(&self) -> usize {
        self.state.image_requests.load(Ordering::SeqCst)
    }

    pub fn image_url(&self, name: &str) -> String {
        format!("{}/images/{}", self.base_url(), name)
    }

    pub async fn product(&self, id: &str) -> Product {
        self.client().get_product(id).await.unwrap()
    }
}

pub async fn spawn_catalog() -> MockCatalog {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(MockState {
        base_url: format!("http://{}", addr),
        image_requests: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/api/v1/categories", get(categories))
        .route("/api/v1/products", get(products))
        .route("/api/v1/products/{id}", get(product))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/signup", post(signup))
        .route("/images/{name}", get(image))
        .fallback(|| async { StatusCode::BAD_GATEWAY })
        .with_state(Arc::clone(&state));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockCatalog { state }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn product_fixtures(base: &str) -> Vec<Value> {
    vec![
        json!({
            "_id": "p1",
            "name": "Classic White T-Shirt",
            "category": {"_id": "c1", "name": "Pure Cotton"},
            "prices": {"resellerPrice": 599, "specialPrice": 649, "mrp": 1000, "regularPrice": 750},
            "colors": [
                {
                    "_id": "red",
                    "colorName": "Red",
                    "images": [
                        format!("{}/images/red-0.jpg", base),
                        format!("{}/images/red-1.jpg", base),
                        format!("{}/images/red-2.jpg", base)
                    ]
                },
                {
                    "_id": "blue",
                    "colorName": "Blue",
                    "images": [
                        format!("{}/images/missing-0.jpg", base),
                        format!("{}/images/blue-1.jpg", base)
                    ]
                }
            ],
            "pdfLink": "",
            "description": "Breathable everyday cotton.",
            "isActive": true,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }),
        json!({
            "_id": "p2",
            "name": "Linen Shirt",
            "category": {"_id": "c2", "name": "Linen"},
            "prices": {"resellerPrice": 400, "specialPrice": 450, "mrp": 500, "regularPrice": 500},
            "colors": [
                {"_id": "green", "colorName": "Green", "images": [format!("{}/images/green-0.png", base)]}
            ],
            "description": "",
            "isActive": false
        }),
        json!({
            "_id": "p3",
            "name": "Silk Dupatta",
            "category": {"_id": "c3", "name": "Silk"},
            "prices": {"resellerPrice": 800, "specialPrice": 900, "mrp": 1000, "regularPrice": 999},
            "colors": [
                {"_id": "ivory", "colorName": "Ivory", "images": []}
            ],
            "description": "Hand-finished edges.",
            "isActive": true
        }),
    ]
}

async fn categories() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {"_id": "c1", "name": "Pure Cotton", "imageUrl": "https://cdn.test/cotton.jpg", "description": "Soft"},
            {"_id": "c2", "name": "Linen", "description": "Cool"}
        ]
    }))
}

#[derive(Deserialize)]
struct ProductQuery {
    category: Option<String>,
}

async fn products(
    State(state): State<Arc<MockState>>,
    Query(query): Query<ProductQuery>,
) -> Json<Value> {
    let data: Vec<Value> = product_fixtures(&state.base_url)
        .into_iter()
        .filter(|p| match &query.category {
            Some(c) => p["category"]["_id"] == c.as_str(),
            None => true,
        })
        .collect();
    Json(json!({"success": true, "data": data}))
}

async fn product(State(state): State<Arc<MockState>>, UrlPath(id): UrlPath<String>) -> Response {
    match product_fixtures(&state.base_url).into_iter().find(|p| p["_id"] == id.as_str()) {
        Some(p) => Json(json!({"success": true, "data": p})).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Product not found"})),
        )
            .into_response(),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email != USER_EMAIL {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "User not found"})),
        )
            .into_response();
    }
    if password != USER_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid credentials"})),
        )
            .into_response();
    }

    Json(json!({
        "success": true,
        "data": {
            "user": {"_id": "u1", "name": "Asha", "email": USER_EMAIL},
            "token": "token-u1"
        }
    }))
    .into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email == TAKEN_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Email already registered"})),
        )
            .into_response();
    }

    Json(json!({
        "success": true,
        "data": {"_id": "u2", "name": body["name"], "email": email}
    }))
    .into_response()
}

async fn image(State(state): State<Arc<MockState>>, UrlPath(name): UrlPath<String>) -> Response {
    state.image_requests.fetch_add(1, Ordering::SeqCst);
    if name.starts_with("missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    (StatusCode::OK, image_bytes(&name)).into_response()
}

/// Body served for `/images/{name}`.
pub fn image_bytes(name: &str) -> Vec<u8> {
    format!("image:{}", name).into_bytes()
}

/// One call observed by [`RecordingShare`].
#[derive(Debug, Clone)]
pub struct RecordedShare {
    pub message: Option<String>,
    pub attachment: Option<PathBuf>,
    /// Attachment contents at the time of the call
    pub attachment_bytes: Option<Vec<u8>>,
    /// Files in the share cache at the time of the call
    pub cache_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Share platform that records every call and can simulate failures.
#[derive(Debug, Clone)]
pub struct RecordingShare {
    calls: Arc<Mutex<Vec<RecordedShare>>>,
    cache_dir: PathBuf,
    behavior: Behavior,
}

impl RecordingShare {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            calls: Arc::default(),
            cache_dir: cache_dir.to_path_buf(),
            behavior: Behavior::Succeed,
        }
    }

    pub fn failing(mut self) -> Self {
        self.behavior = Behavior::Fail;
        self
    }

    /// Panic inside the platform call, after recording it.
    pub fn panicking(mut self) -> Self {
        self.behavior = Behavior::Panic;
        self
    }

    pub fn calls(&self) -> Vec<RecordedShare> {
        self.calls.lock().unwrap().clone()
    }
}

impl SharePlatform for RecordingShare {
    async fn share(&self, request: ShareRequest<'_>) -> Result<(), PlatformShareError> {
        let recorded = RecordedShare {
            message: request.message.map(String::from),
            attachment: request.attachment.map(Path::to_path_buf),
            attachment_bytes: request.attachment.and_then(|p| std::fs::read(p).ok()),
            cache_files: count_files(&self.cache_dir),
        };
        self.calls.lock().unwrap().push(recorded);

        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(PlatformShareError::Failed("simulated platform failure".into())),
            Behavior::Panic => panic!("simulated platform panic"),
        }
    }
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Flow wired to the mock backend, sharing into `platform`.
pub fn share_flow<P: SharePlatform>(
    catalog: &MockCatalog,
    cache_dir: &Path,
    platform: P,
) -> ShareFlow<P> {
    let client = catalog.client();
    let downloader = ImageDownloader::new(client.http().clone(), cache_dir);
    ShareFlow::new(ShareComposer::default(), downloader, platform)
}
