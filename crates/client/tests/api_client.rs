//! HTTP-level tests of `ApiClient` against an in-process fake API.

mod common;

use pretty_assertions::assert_eq;
use sejour_client::{ClientError, ImageUpload, ListQuery, QueryCache, UploadFile};
use sejour_core::{BookingStatus, EntityId, Price, Resource};
use sejour_model::{
    AddressFields, Booking, BookingAction, Hotel, HotelFormData, OwnerVerification, Room,
};

use common::{TOKEN, spawn_server};

fn hotel_form() -> HotelFormData {
    HotelFormData {
        name: "Hotel Wouri".to_string(),
        address: AddressFields {
            address: "1 Rue Centrale".to_string(),
            city: "Douala".to_string(),
            country: "Cameroon".to_string(),
            latitude: Some(4.05),
            longitude: Some(9.7),
        },
        stars: 4,
        amenities: vec![2, 5],
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_sends_page_and_search() {
    let server = spawn_server().await;
    let client = server.client();

    let page = client
        .list::<Hotel>(&ListQuery::new().page(2).search("Akwa"))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Hotel Akwa");
    assert_eq!(page.data[0].min_rate, Some(Price::new(40.0)));
    let meta = page.meta_or_single();
    assert_eq!(meta.current_page, 2);
    assert!(meta.has_next());
    assert!(meta.has_previous());
}

#[tokio::test]
async fn test_fetch_unwraps_data_envelope() {
    let server = spawn_server().await;
    let hotel: Hotel = server.client().fetch(EntityId(7)).await.unwrap();
    assert_eq!(hotel.id, EntityId(7));
    assert_eq!(hotel.location.city, "Douala");
}

#[tokio::test]
async fn test_not_found_is_classified() {
    let server = spawn_server().await;
    let err = server
        .client()
        .fetch::<Hotel>(EntityId(404))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Hotel not found.");
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_with_images_is_multipart() {
    let server = spawn_server().await;
    let client = server.client();

    let images = ImageUpload::from_files(vec![
        UploadFile::from_bytes("front.jpg", vec![0xFF, 0xD8]),
        UploadFile::from_bytes("pool.png", vec![0x89, 0x50]),
        UploadFile::from_bytes("room.webp", vec![0x52, 0x49]),
    ]);

    let hotel: Hotel = client.create(&hotel_form(), images).await.unwrap();
    assert_eq!(hotel.name, "Hotel Wouri");
    assert_eq!(
        hotel.description.as_deref(),
        Some("main=front.jpg gallery=2 amenities=2,5")
    );
}

#[tokio::test]
async fn test_create_without_main_image_reports_field_error() {
    let server = spawn_server().await;
    let client = server.client();

    // Multipart body carrying text fields only
    let err = client
        .send_multipart::<Hotel>(
            reqwest::Method::POST,
            "hotels",
            vec![("name".to_string(), "x".to_string())],
            ImageUpload::default(),
        )
        .await
        .unwrap_err();

    assert!(err.is_validation());
    let envelope = err.envelope().unwrap();
    assert_eq!(
        envelope.errors["main_image"],
        vec!["The main image field is required."]
    );
}

#[tokio::test]
async fn test_update_with_images_tunnels_put() {
    let server = spawn_server().await;
    let mut images = ImageUpload::from_files(vec![
        UploadFile::from_bytes("lobby.jpg", vec![0xFF, 0xD8]),
        UploadFile::from_bytes("bar.png", vec![0x89, 0x50]),
    ]);
    images.removed_image_ids = vec![31, 32];

    let hotel: Hotel = server
        .client()
        .update(EntityId(7), &hotel_form(), images)
        .await
        .unwrap();

    assert_eq!(hotel.id, EntityId(7));
    assert_eq!(hotel.name, "Hotel Wouri");
    assert_eq!(
        hotel.description.as_deref(),
        Some("method=PUT main=lobby.jpg gallery=1 removed=31,32")
    );
}

#[tokio::test]
async fn test_update_with_removals_only_is_json() {
    let server = spawn_server().await;
    let images = ImageUpload {
        removed_image_ids: vec![4],
        ..Default::default()
    };

    let hotel: Hotel = server
        .client()
        .update(EntityId(7), &hotel_form(), images)
        .await
        .unwrap();

    assert_eq!(hotel.name, "Hotel Wouri");
    assert_eq!(hotel.description.as_deref(), Some("method=PUT json removed=4"));
}

#[tokio::test]
async fn test_delete_requires_token() {
    let server = spawn_server().await;
    let client = server.client();

    let err = client.remove::<Hotel>(EntityId(3)).await.unwrap_err();
    assert!(err.is_unauthorized());

    client.set_token(Some(TOKEN.to_string()));
    client.remove::<Hotel>(EntityId(3)).await.unwrap();
}

#[tokio::test]
async fn test_set_availability_patches_flag() {
    let server = spawn_server().await;
    let room: Room = server
        .client()
        .set_availability(EntityId(4), false)
        .await
        .unwrap();
    assert!(!room.is_available);
    assert_eq!(room.price, Price::new(120.0));
}

// ---------------------------------------------------------------------------
// Bookings and verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_cancel_booking() {
    let server = spawn_server().await;
    let booking: Booking = server
        .client()
        .booking_action(EntityId(12), BookingAction::Cancel)
        .await
        .unwrap();
    assert_eq!(booking.id, EntityId(12));
    assert_eq!(booking.status, BookingStatus::Annule);
    assert!(booking.available_actions().is_empty());
}

#[tokio::test]
async fn test_receipt_is_binary_pdf() {
    let server = spawn_server().await;
    let bytes = server.client().booking_receipt(EntityId(12)).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_verification_token() {
    let server = spawn_server().await;
    let token = server
        .client()
        .verification_token(EntityId(8))
        .await
        .unwrap();
    assert_eq!(token, "verify-8");
    assert_eq!(OwnerVerification::member_path(EntityId(8)), "owner-verifications/8");
}

// ---------------------------------------------------------------------------
// Cache + client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_cache_deduplicates_list_requests() {
    let server = spawn_server().await;
    let client = server.client();
    let cache = QueryCache::new();
    let query = ListQuery::new().page(1);
    let key = query.cache_key("hotels");

    let fetch = || {
        let client = client.clone();
        let query = query.clone();
        move || async move { client.list::<Hotel>(&query).await }
    };

    let (a, b) = tokio::join!(
        cache.fetch(key.clone(), fetch()),
        cache.fetch(key.clone(), fetch())
    );
    assert_eq!(a.unwrap().data, b.unwrap().data);
    assert_eq!(server.hits.hotels_list(), 1);

    cache
        .mutate(&["hotels"], async { Ok::<_, ClientError>(()) })
        .await
        .unwrap();
    cache.fetch(key, fetch()).await.unwrap();
    assert_eq!(server.hits.hotels_list(), 2);
}
