// NestQuest - API Core
//
// Backend for the NestQuest property and hostel listing marketplace.
// Domain code lives in domains/*, HTTP wiring in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
