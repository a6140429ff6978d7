//! Test fixtures for creating listings.
//!
//! Fixtures go through the model layer directly; the HTTP surface is
//! exercised by the tests themselves.

use anyhow::Result;
use serde_json::{json, Value};
use sqlx::PgPool;

use server_core::common::UserId;
use server_core::domains::listings::input::ListingData;
use server_core::domains::listings::models::ListingRecord;

/// A valid sale listing payload; tweak fields per test.
pub fn sample_listing(name: &str) -> ListingData {
    ListingData {
        name: name.to_string(),
        description: format!("{} - a comfortable place to live", name),
        address: "42 Park Avenue".to_string(),
        listing_type: "sale".to_string(),
        bedrooms: 3,
        bathrooms: 2,
        regular_price: 450_000,
        discount_price: 0,
        offer: false,
        parking: false,
        furnished: false,
        image_urls: vec!["https://cdn.example/front.jpg".to_string()],
        map_url: None,
        for_students: false,
        hostel_type: None,
    }
}

/// The same payload as raw JSON, as a browser client would send it.
pub fn sample_listing_json(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} - a comfortable place to live", name),
        "address": "42 Park Avenue",
        "type": "sale",
        "bedrooms": 3,
        "bathrooms": 2,
        "regularPrice": 450_000,
        "discountPrice": 0,
        "offer": false,
        "parking": false,
        "furnished": false,
        "imageUrls": ["https://cdn.example/front.jpg"],
        "forStudents": false
    })
}

/// Persist a listing for `owner` with default fields.
pub async fn create_test_listing(
    pool: &PgPool,
    owner: UserId,
    name: &str,
) -> Result<ListingRecord> {
    ListingRecord::create(owner, &sample_listing(name), pool).await
}

/// Persist a listing after applying `tweak` to the default payload.
pub async fn create_test_listing_with(
    pool: &PgPool,
    owner: UserId,
    name: &str,
    tweak: impl FnOnce(&mut ListingData),
) -> Result<ListingRecord> {
    let mut data = sample_listing(name);
    tweak(&mut data);
    ListingRecord::create(owner, &data, pool).await
}

/// Persist a student (hostel) listing of the given classification.
pub async fn create_test_hostel_listing(
    pool: &PgPool,
    owner: UserId,
    name: &str,
    hostel_type: &str,
) -> Result<ListingRecord> {
    create_test_listing_with(pool, owner, name, |data| {
        data.listing_type = "rent".to_string();
        data.regular_price = 8_000;
        data.for_students = true;
        data.hostel_type = Some(hostel_type.to_string());
    })
    .await
}
