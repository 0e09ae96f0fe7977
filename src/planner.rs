//! Prompt assembly and plan generation
//!
//! The planner turns a validated request into a deterministic prompt,
//! runs exactly one completion call against the configured backend and
//! hands the generated text back to the HTTP layer.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::error::TripVaultsError;
use crate::models::{BudgetTier, TravelPlanRequest};
use crate::openai::CompletionBackend;

/// Trip length used when no usable date range is supplied
pub const DEFAULT_TRIP_DAYS: i64 = 5;

/// Fixed system message sent with every completion request
pub const SYSTEM_MESSAGE: &str = "You are the TripVaults travel planner.";

/// Compute the trip length in days from an optional date range.
///
/// Falls back to [`DEFAULT_TRIP_DAYS`] unless both dates parse as
/// `YYYY-MM-DD` and the span is positive.
#[must_use]
pub fn trip_duration_days(start: Option<&str>, end: Option<&str>) -> i64 {
    let (Some(start), Some(end)) = (start, end) else {
        return DEFAULT_TRIP_DAYS;
    };

    let (Ok(start), Ok(end)) = (
        NaiveDate::parse_from_str(start, "%Y-%m-%d"),
        NaiveDate::parse_from_str(end, "%Y-%m-%d"),
    ) else {
        return DEFAULT_TRIP_DAYS;
    };

    let days = (end - start).num_days();
    if days > 0 { days } else { DEFAULT_TRIP_DAYS }
}

/// Assemble the prompt for a validated request.
///
/// Pure string interpolation; nothing here branches on the generated
/// content.
#[must_use]
pub fn build_prompt(request: &TravelPlanRequest) -> String {
    let days = trip_duration_days(request.start_date.as_deref(), request.end_date.as_deref());
    let people = request
        .people
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let budget = BudgetTier::parse(request.budget.as_deref());

    format!(
        "Create a {days}-day travel plan for {people} {group_type} traveling to {destination}.\n\
         Their interests are: {interests}.\n\
         Keep the suggestions {budget} overall.\n\
         Break each day into morning, afternoon and evening.\n\
         Include hidden gems, local tips, restaurant suggestions, a few useful \
         local phrases, and mobile apps worth installing for the trip.\n\
         Write the plan in {language}.",
        group_type = request.group_type(),
        destination = request.destination(),
        interests = request.interests_joined(),
        budget = budget.label(),
        language = request.language(),
    )
}

/// Generates travel plans by delegating prompt completion to the backend
/// configured at startup.
pub struct PlannerService {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl PlannerService {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    /// Whether a completion backend was configured at startup
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Validate the request, assemble the prompt and run one completion
    /// call. The first upstream answer (or failure) is final; there are
    /// no retries.
    #[instrument(skip_all)]
    pub async fn generate_plan(&self, request: &TravelPlanRequest) -> crate::Result<String> {
        request.validate()?;

        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| TripVaultsError::config("OpenAI API key not configured"))?;

        let prompt = build_prompt(request);
        debug!(backend = backend.name(), prompt_len = prompt.len(), "Assembled travel-plan prompt");

        let plan = backend.complete(SYSTEM_MESSAGE, &prompt).await?;

        info!(destination = request.destination(), plan_len = plan.len(), "Generated travel plan");
        Ok(plan)
    }
}
