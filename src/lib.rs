//! `TripVaults` - AI travel planning backend
//!
//! This library provides the HTTP surface, prompt assembly and
//! completion-API client behind the `TripVaults` travel planner.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod openai;
pub mod planner;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::{OpenAiConfig, ServerConfig, TripVaultsConfig};
pub use error::TripVaultsError;
pub use models::{BudgetTier, HealthResponse, PeopleCount, TravelPlanRequest, TravelPlanResponse};
pub use openai::{CompletionBackend, OpenAiClient};
pub use planner::PlannerService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripVaultsError>;
