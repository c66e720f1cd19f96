//! External service interactions
//!
//! This module contains services for talking to the outside world:
//! - Influencer search API client
//! - Identity provider (sessions, sign-in/up/out, change notifications)
//! - Relational backend (recent searches, campaigns)
//! - CSV export
//! - Background task execution

pub mod auth;
pub mod error;
pub mod export;
pub mod search_api;
pub mod store;
pub mod task;

#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod search_api_test;
#[cfg(test)]
mod store_test;

pub use auth::{AuthClient, SignUpOutcome};
pub use error::ApiError;
pub use export::export_profiles;
pub use search_api::SearchClient;
pub use store::StoreClient;
pub use task::TaskRunner;
