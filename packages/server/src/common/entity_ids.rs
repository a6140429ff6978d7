//! Typed ID aliases for the domain entities.

pub use super::id::Id;

/// Marker type for users (listing owners, identified by the auth service).
pub struct User;

/// Marker type for property listings.
pub struct Listing;

/// Typed ID for users.
pub type UserId = Id<User>;

/// Typed ID for listings.
pub type ListingId = Id<Listing>;
