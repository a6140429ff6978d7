//! Listing payload validation.
//!
//! The same payload shape and invariant set apply to create and update, so
//! both handlers share [`ListingData`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::domains::listings::models::{HostelType, ListingType};

/// Prefix every map embed link must carry.
pub const MAP_EMBED_PREFIX: &str = "https://www.google.com/maps/embed";

/// Validation failures surface as 400s with these messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one media file is required")]
    MissingMedia,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid listing type")]
    InvalidListingType,

    #[error("Discount price must be lower than regular price")]
    DiscountNotBelowRegular,

    #[error("Invalid map URL")]
    InvalidMapUrl,

    #[error("Hostel type is required for student listings")]
    MissingHostelType,

    #[error("Invalid hostel type")]
    InvalidHostelType,
}

/// Client-supplied listing fields, shared by the create and update routes.
///
/// Every field is defaultable so that an incomplete payload deserializes and
/// then fails validation with a proper "missing fields" message instead of a
/// deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingData {
    pub name: String,
    pub description: String,
    pub address: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub regular_price: i64,
    pub discount_price: i64,
    pub offer: bool,
    pub parking: bool,
    pub furnished: bool,
    pub image_urls: Vec<String>,
    pub map_url: Option<String>,
    pub for_students: bool,
    pub hostel_type: Option<String>,
}

impl ListingData {
    /// Check every invariant the data model demands.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_urls.is_empty() || self.image_urls.iter().any(|u| u.trim().is_empty()) {
            return Err(ValidationError::MissingMedia);
        }

        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.address.trim().is_empty()
            || self.listing_type.trim().is_empty()
            || self.bedrooms <= 0
            || self.bathrooms <= 0
            || self.regular_price <= 0
            || self.discount_price < 0
        {
            return Err(ValidationError::MissingFields);
        }

        if ListingType::from_str(&self.listing_type).is_err() {
            return Err(ValidationError::InvalidListingType);
        }

        if self.offer && self.discount_price >= self.regular_price {
            return Err(ValidationError::DiscountNotBelowRegular);
        }

        if let Some(url) = &self.map_url {
            if !url.starts_with(MAP_EMBED_PREFIX) {
                return Err(ValidationError::InvalidMapUrl);
            }
        }

        if self.for_students {
            match &self.hostel_type {
                None => return Err(ValidationError::MissingHostelType),
                Some(value) => {
                    if HostelType::from_str(value).is_err() {
                        return Err(ValidationError::InvalidHostelType);
                    }
                }
            }
        }

        Ok(())
    }

    /// Hostel type as persisted: only student listings carry one, whatever
    /// the payload said.
    pub fn effective_hostel_type(&self) -> Option<&str> {
        if self.for_students {
            self.hostel_type.as_deref()
        } else {
            None
        }
    }
}
