//! Listing CRUD and search routes.
//!
//! Reads are public; create/update/delete sit behind the auth gate and only
//! ever touch the caller's own listings.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::common::ListingId;
use crate::domains::listings::input::ListingData;
use crate::domains::listings::models::ListingRecord;
use crate::domains::listings::search::{ListingQueryParams, ListingSearch};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

pub async fn create_listing(
    Extension(state): Extension<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(data): Json<ListingData>,
) -> Result<(StatusCode, Json<ListingRecord>), ApiError> {
    data.validate()?;

    let listing = ListingRecord::create(auth.user_id, &data, &state.db_pool).await?;
    tracing::info!(listing_id = %listing.id, owner_id = %auth.user_id, "Listing created");

    Ok((StatusCode::CREATED, Json(listing)))
}

pub async fn get_listing(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingRecord>, ApiError> {
    let listing = ListingRecord::find_by_id(ListingId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listing not found!".to_string()))?;

    Ok(Json(listing))
}

pub async fn get_listings(
    Extension(state): Extension<AppState>,
    Query(params): Query<ListingQueryParams>,
) -> Result<Json<Vec<ListingRecord>>, ApiError> {
    let search = ListingSearch::from_params(params);
    let listings = ListingRecord::search(&search, &state.db_pool).await?;

    Ok(Json(listings))
}

pub async fn update_listing(
    Extension(state): Extension<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(data): Json<ListingData>,
) -> Result<Json<ListingRecord>, ApiError> {
    let id = ListingId::from_uuid(id);
    let listing = ListingRecord::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listing not found!".to_string()))?;

    if listing.owner_id != auth.user_id {
        return Err(ApiError::Unauthorized(
            "You can only update your own listings!".to_string(),
        ));
    }

    data.validate()?;

    let updated = ListingRecord::update(id, &data, &state.db_pool).await?;
    tracing::info!(listing_id = %id, owner_id = %auth.user_id, "Listing updated");

    Ok(Json(updated))
}

pub async fn delete_listing(
    Extension(state): Extension<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<String>, ApiError> {
    let id = ListingId::from_uuid(id);
    let listing = ListingRecord::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listing not found!".to_string()))?;

    if listing.owner_id != auth.user_id {
        return Err(ApiError::Unauthorized(
            "You can only delete your own listings!".to_string(),
        ));
    }

    ListingRecord::delete(id, &state.db_pool).await?;
    tracing::info!(listing_id = %id, owner_id = %auth.user_id, "Listing deleted");

    Ok(Json("Listing has been deleted!".to_string()))
}
