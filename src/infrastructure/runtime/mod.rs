//! Runtime infrastructure - Tokio runtime bridge for the dashboard fetches

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use worker::{fetch_widget, run_async_worker};
