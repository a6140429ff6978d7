//! Search parameter normalization for the listing list route.
//!
//! The boolean filters are tri-state with a deliberately non-intuitive
//! contract inherited from the original API: an absent parameter *and* an
//! explicit `false` both mean "match either value"; only `true` narrows the
//! result set.

use serde::Deserialize;

/// Default page size when the client does not send `limit`.
pub const DEFAULT_LIMIT: i64 = 9;

/// Upper bound on `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Raw query parameters as they arrive on `GET /api/listing/get`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQueryParams {
    pub search_term: Option<String>,
    pub offer: Option<bool>,
    pub furnished: Option<bool>,
    pub parking: Option<bool>,
    pub for_students: Option<bool>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub hostel_type: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub start_index: Option<i64>,
}

/// Fields the list route may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    RegularPrice,
    UpdatedAt,
}

impl SortField {
    /// Parse the wire name; anything outside the whitelist falls back to
    /// creation time.
    fn from_param(s: Option<&str>) -> Self {
        match s {
            Some("regularPrice") => SortField::RegularPrice,
            Some("updatedAt") => SortField::UpdatedAt,
            _ => SortField::CreatedAt,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::RegularPrice => "regular_price",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn from_param(s: Option<&str>) -> Self {
        match s {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Normalized search parameters ready to bind into the listing query.
///
/// `None` in a filter field means "match either value".
#[derive(Debug, Clone)]
pub struct ListingSearch {
    pub search_term: Option<String>,
    pub offer: Option<bool>,
    pub furnished: Option<bool>,
    pub parking: Option<bool>,
    pub for_students: Option<bool>,
    pub listing_type: Option<String>,
    pub hostel_type: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

impl ListingSearch {
    pub fn from_params(params: ListingQueryParams) -> Self {
        Self {
            search_term: params.search_term.filter(|s| !s.is_empty()),
            offer: tri_state(params.offer),
            furnished: tri_state(params.furnished),
            parking: tri_state(params.parking),
            for_students: tri_state(params.for_students),
            listing_type: params.listing_type.filter(|t| t != "all"),
            hostel_type: params.hostel_type.filter(|t| t != "all"),
            sort: SortField::from_param(params.sort.as_deref()),
            order: SortOrder::from_param(params.order.as_deref()),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: params.start_index.unwrap_or(0).max(0),
        }
    }
}

/// Collapse the tri-state contract: only an explicit `true` filters.
fn tri_state(value: Option<bool>) -> Option<bool> {
    match value {
        Some(true) => Some(true),
        _ => None,
    }
}

impl Default for ListingSearch {
    fn default() -> Self {
        Self::from_params(ListingQueryParams::default())
    }
}
