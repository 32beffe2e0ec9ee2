//! HTTP access to the HR server's dashboard endpoints

mod client;

pub use client::{DashboardClient, FetchError};
