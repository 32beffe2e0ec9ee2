//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest client for the HR server's dashboard endpoints
//! - Tokio runtime bridge for the concurrent fetches

pub mod http;
pub mod runtime;

pub use http::{DashboardClient, FetchError};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
