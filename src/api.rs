//! HTTP surface for the `TripVaults` backend

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tracing::{info, warn};

use crate::config::TripVaultsConfig;
use crate::models::{HealthResponse, TravelPlanRequest, TravelPlanResponse};
use crate::openai::{CompletionBackend, OpenAiClient};
use crate::planner::PlannerService;

/// Per-process state shared by the handlers. Built once at startup and
/// cloned into each request.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<PlannerService>,
}

impl AppState {
    /// Build the handler state from the loaded configuration.
    pub fn new(config: &TripVaultsConfig) -> crate::Result<Self> {
        let backend: Option<Arc<dyn CompletionBackend>> = if config.openai.api_key.is_some() {
            Some(Arc::new(OpenAiClient::new(config.openai.clone())?))
        } else {
            warn!("OPENAI_API_KEY not set. API calls will fail.");
            None
        };

        Ok(Self {
            planner: Arc::new(PlannerService::new(backend)),
        })
    }

    /// State backed by a custom completion backend. Used by the
    /// integration tests.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            planner: Arc::new(PlannerService::new(Some(backend))),
        }
    }

    /// State without any backend, behaving as if the credential was
    /// absent.
    #[must_use]
    pub fn without_backend() -> Self {
        Self {
            planner: Arc::new(PlannerService::new(None)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/travel-plan", post(travel_plan))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let api_key = if state.planner.is_configured() {
        "set"
    } else {
        "not_set"
    };

    Json(HealthResponse {
        status: "TripVaults API is running!",
        message: "Backend is ready",
        api_key,
    })
}

async fn travel_plan(
    State(state): State<AppState>,
    Json(request): Json<TravelPlanRequest>,
) -> crate::Result<Json<TravelPlanResponse>> {
    info!(destination = ?request.destination, "Received travel-plan request");

    let plan = state.planner.generate_plan(&request).await?;

    Ok(Json(TravelPlanResponse { plan }))
}
