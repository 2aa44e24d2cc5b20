//! In-process fake of the booking API for client integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;

use sejour_client::ApiClient;

/// Token handed out by the fake login endpoint
pub const TOKEN: &str = "abc";

/// Password accepted by the fake login endpoint
pub const PASSWORD: &str = "secret1";

/// Request counters observed by tests
#[derive(Default)]
pub struct Hits {
    pub hotels_list: AtomicUsize,
    pub logout: AtomicUsize,
}

impl Hits {
    pub fn hotels_list(&self) -> usize {
        self.hotels_list.load(Ordering::SeqCst)
    }

    pub fn logout(&self) -> usize {
        self.logout.load(Ordering::SeqCst)
    }
}

/// A running fake server
pub struct TestServer {
    pub addr: SocketAddr,
    pub hits: Arc<Hits>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(&self.base_url()).expect("valid base url")
    }
}

/// Spawn the fake API on an ephemeral port
pub async fn spawn_server() -> TestServer {
    let hits = Arc::new(Hits::default());

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route(
            "/hotels/{id}",
            get(show_hotel)
                .post(update_hotel_multipart)
                .put(update_hotel_json)
                .delete(delete_hotel),
        )
        .route("/rooms/{id}", axum::routing::patch(toggle_room))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/receipt", get(receipt))
        .route("/owner-verifications/{id}/token", get(verification_token))
        .with_state(hits.clone());

    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake api");
    });

    TestServer { addr, hits }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user_json() -> Value {
    json!({ "id": 1, "name": "Test User", "email": "user@test.com", "type": "OWNER" })
}

pub fn hotel_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "1 Rue Centrale",
        "city": "Douala",
        "country": "Cameroon",
        "latitude": 4.05,
        "longitude": 9.7,
        "stars": 3,
        "min_rate": "40.00",
        "main_image": { "url": format!("https://cdn.test/{}.jpg", id) },
        "gallery": [],
        "amenities": []
    })
}

fn booking_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "reference": format!("BK-{:04}", id),
        "status": status,
        "check_in": "2026-03-01",
        "check_out": "2026-03-03",
        "guests": 2,
        "total_price": 90,
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthenticated." })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN, "user": user_json() })).into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "The given data was invalid.",
                "errors": { "password": ["invalid"] }
            })),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    if authorized(&headers) {
        Json(json!({ "data": user_json() })).into_response()
    } else {
        unauthenticated()
    }
}

async fn logout(State(hits): State<Arc<Hits>>, headers: HeaderMap) -> Response {
    hits.logout.fetch_add(1, Ordering::SeqCst);
    if authorized(&headers) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        unauthenticated()
    }
}

async fn list_hotels(
    State(hits): State<Arc<Hits>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.hotels_list.fetch_add(1, Ordering::SeqCst);
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let search = params.get("search").cloned().unwrap_or_default();
    Json(json!({
        "data": [hotel_json(u64::from(page), &format!("Hotel {}", search))],
        "meta": { "current_page": page, "last_page": 3, "per_page": 1, "total": 3 }
    }))
    .into_response()
}

async fn show_hotel(Path(id): Path<u64>) -> Response {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Hotel not found." })),
        )
            .into_response();
    }
    Json(json!({ "data": hotel_json(id, "Hotel Akwa") })).into_response()
}

async fn delete_hotel(headers: HeaderMap) -> Response {
    if authorized(&headers) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        unauthenticated()
    }
}

/// Echoes what it received: the name field, the number of gallery files and
/// the amenity ids, so tests can assert on the multipart encoding.
async fn create_hotel(mut multipart: Multipart) -> Response {
    let mut name = String::new();
    let mut main_image = None;
    let mut gallery = 0usize;
    let mut amenities: Vec<String> = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = field.text().await.unwrap_or_default(),
            "amenities[]" => amenities.push(field.text().await.unwrap_or_default()),
            "main_image" => {
                main_image = field.file_name().map(str::to_string);
                let _ = field.bytes().await;
            }
            "gallery_images[]" => {
                gallery += 1;
                let _ = field.bytes().await;
            }
            _ => {}
        }
    }

    if main_image.is_none() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": { "main_image": ["The main image field is required."] } })),
        )
            .into_response();
    }

    let mut hotel = hotel_json(99, &name);
    hotel["description"] = json!(format!(
        "main={} gallery={} amenities={}",
        main_image.unwrap_or_default(),
        gallery,
        amenities.join(",")
    ));
    (StatusCode::CREATED, Json(json!({ "data": hotel }))).into_response()
}

/// Multipart update: reports the tunnelled method, the gallery file count and
/// the removed image ids in the description.
async fn update_hotel_multipart(Path(id): Path<u64>, mut multipart: Multipart) -> Response {
    let mut method = String::from("POST");
    let mut name = String::new();
    let mut main_image = None;
    let mut gallery = 0usize;
    let mut removed: Vec<String> = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "_method" => method = field.text().await.unwrap_or_default(),
            "name" => name = field.text().await.unwrap_or_default(),
            "removed_images[]" => removed.push(field.text().await.unwrap_or_default()),
            "main_image" => {
                main_image = field.file_name().map(str::to_string);
                let _ = field.bytes().await;
            }
            "gallery_images[]" => {
                gallery += 1;
                let _ = field.bytes().await;
            }
            _ => {}
        }
    }

    let mut hotel = hotel_json(id, &name);
    hotel["description"] = json!(format!(
        "method={} main={} gallery={} removed={}",
        method,
        main_image.unwrap_or_else(|| "-".to_string()),
        gallery,
        removed.join(",")
    ));
    Json(json!({ "data": hotel })).into_response()
}

/// JSON update: reports the removed image ids in the description
async fn update_hotel_json(Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let removed: Vec<String> = body["removed_images"]
        .as_array()
        .map(|ids| ids.iter().map(Value::to_string).collect())
        .unwrap_or_default();

    let mut hotel = hotel_json(id, &name);
    hotel["description"] = json!(format!("method=PUT json removed={}", removed.join(",")));
    Json(json!({ "data": hotel })).into_response()
}

async fn toggle_room(Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    Json(json!({
        "id": id,
        "hotel_id": 1,
        "name": "Suite",
        "type": "SUITE",
        "price": 120.0,
        "capacity": 2,
        "is_available": body["is_available"],
    }))
    .into_response()
}

async fn cancel_booking(Path(id): Path<u64>) -> Response {
    Json(json!({ "data": booking_json(id, "ANNULE") })).into_response()
}

async fn receipt(Path(id): Path<u64>, Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("format").map(String::as_str) != Some("pdf") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        format!("%PDF-1.4 receipt {}", id).into_bytes(),
    )
        .into_response()
}

async fn verification_token(Path(id): Path<u64>) -> Response {
    Json(json!({ "token": format!("verify-{}", id) })).into_response()
}
