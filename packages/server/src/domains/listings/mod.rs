// Listings domain: the persisted marketplace entity, its validation rules,
// and the filtered search query.

pub mod input;
pub mod models;
pub mod search;
