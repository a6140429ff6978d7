use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::common::{ListingId, UserId};
use crate::domains::listings::input::ListingData;
use crate::domains::listings::search::ListingSearch;

/// A property listing as persisted in the `listings` table.
///
/// Serialized with camelCase keys to match the public API wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub address: String,
    #[serde(rename = "type")]
    pub listing_type: String, // 'sale', 'rent'
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub regular_price: i64,
    pub discount_price: i64,
    pub offer: bool,
    pub parking: bool,
    pub furnished: bool,
    pub image_urls: Vec<String>,
    pub owner_id: UserId,
    pub map_url: Option<String>,
    pub for_students: bool,
    pub hostel_type: Option<String>, // 'girls', 'boys', 'co'; present iff for_students
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums for type-safe filtering and validation
// =============================================================================

/// Listing type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Rent,
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingType::Sale => write!(f, "sale"),
            ListingType::Rent => write!(f, "rent"),
        }
    }
}

impl std::str::FromStr for ListingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            _ => Err(anyhow::anyhow!("Invalid listing type: {}", s)),
        }
    }
}

/// Hostel classification for student listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HostelType {
    Girls,
    Boys,
    Co,
}

impl std::fmt::Display for HostelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostelType::Girls => write!(f, "girls"),
            HostelType::Boys => write!(f, "boys"),
            HostelType::Co => write!(f, "co"),
        }
    }
}

impl std::str::FromStr for HostelType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "girls" => Ok(HostelType::Girls),
            "boys" => Ok(HostelType::Boys),
            "co" => Ok(HostelType::Co),
            _ => Err(anyhow::anyhow!("Invalid hostel type: {}", s)),
        }
    }
}

// =============================================================================
// Persistence
// =============================================================================

impl ListingRecord {
    /// Insert a new listing owned by `owner_id`.
    ///
    /// `data` must have been validated; hostel_type is stored only for
    /// student listings.
    pub async fn create(owner_id: UserId, data: &ListingData, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO listings (id, name, description, address, listing_type,
                                   bedrooms, bathrooms, regular_price, discount_price,
                                   offer, parking, furnished, image_urls, owner_id,
                                   map_url, for_students, hostel_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING *",
        )
        .bind(ListingId::new())
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.listing_type)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.regular_price)
        .bind(data.discount_price)
        .bind(data.offer)
        .bind(data.parking)
        .bind(data.furnished)
        .bind(&data.image_urls)
        .bind(owner_id)
        .bind(&data.map_url)
        .bind(data.for_students)
        .bind(data.effective_hostel_type())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Replace the mutable fields of a listing. Ownership is checked by the
    /// caller; id, owner_id, and created_at never change.
    pub async fn update(id: ListingId, data: &ListingData, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE listings
             SET name = $2, description = $3, address = $4, listing_type = $5,
                 bedrooms = $6, bathrooms = $7, regular_price = $8, discount_price = $9,
                 offer = $10, parking = $11, furnished = $12, image_urls = $13,
                 map_url = $14, for_students = $15, hostel_type = $16,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.listing_type)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.regular_price)
        .bind(data.discount_price)
        .bind(data.offer)
        .bind(data.parking)
        .bind(data.furnished)
        .bind(&data.image_urls)
        .bind(&data.map_url)
        .bind(data.for_students)
        .bind(data.effective_hostel_type())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ListingId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Filtered, sorted, paginated listing query.
    ///
    /// Absent filters are bound as NULL and collapse to TRUE, so one static
    /// query covers every filter combination. The ORDER BY clause is built
    /// from whitelist enums, never from raw input.
    pub async fn search(params: &ListingSearch, pool: &PgPool) -> Result<Vec<Self>> {
        let query = format!(
            "SELECT * FROM listings
             WHERE name ILIKE '%' || $1 || '%'
               AND ($2::boolean IS NULL OR offer = $2)
               AND ($3::boolean IS NULL OR furnished = $3)
               AND ($4::boolean IS NULL OR parking = $4)
               AND ($5::text IS NULL OR listing_type = $5)
               AND ($6::boolean IS NULL OR for_students = $6)
               AND ($7::text IS NULL OR hostel_type = $7)
             ORDER BY {} {}, id {}
             LIMIT $8 OFFSET $9",
            params.sort.column(),
            params.order.keyword(),
            params.order.keyword(),
        );

        sqlx::query_as::<_, Self>(&query)
            .bind(params.search_term.as_deref().unwrap_or(""))
            .bind(params.offer)
            .bind(params.furnished)
            .bind(params.parking)
            .bind(params.listing_type.as_deref())
            .bind(params.for_students)
            .bind(params.hostel_type.as_deref())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
