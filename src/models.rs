//! Request and response types for the travel-plan API

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TripVaultsError;

/// Group description used when the request does not provide one
pub const DEFAULT_GROUP_TYPE: &str = "travelers";

/// Plan language used when the request does not provide one
pub const DEFAULT_LANGUAGE: &str = "English";

/// Traveler count as submitted by the frontend. Number inputs arrive as
/// JSON numbers, plain form fields as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeopleCount {
    Count(u64),
    Text(String),
}

impl PeopleCount {
    /// A zero count or a blank string counts the same as an absent field.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            PeopleCount::Count(n) => *n == 0,
            PeopleCount::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for PeopleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeopleCount::Count(n) => write!(f, "{n}"),
            PeopleCount::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// Budget tiers understood by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Budget,
    Mid,
    Luxury,
}

impl BudgetTier {
    /// Map a raw budget value to a tier. Unrecognized or missing values
    /// fall back to the mid tier.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("budget") => BudgetTier::Budget,
            Some("luxury") => BudgetTier::Luxury,
            _ => BudgetTier::Mid,
        }
    }

    /// Label interpolated into the prompt
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget-friendly",
            BudgetTier::Mid => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }
}

/// Inbound travel-plan request.
///
/// Every field deserializes as optional so that missing data surfaces as
/// a validation error with a JSON body, not as a decode rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanRequest {
    pub destination: Option<String>,
    pub people: Option<PeopleCount>,
    pub interests: Option<Vec<String>>,
    pub group_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<String>,
    pub language: Option<String>,
}

impl TravelPlanRequest {
    /// Check the required fields. A request that fails here never reaches
    /// the completion API.
    pub fn validate(&self) -> crate::Result<()> {
        match &self.destination {
            Some(destination) if !destination.trim().is_empty() => {}
            _ => {
                return Err(TripVaultsError::validation(
                    "Missing required field: destination",
                ));
            }
        }

        match &self.people {
            Some(people) if !people.is_blank() => {}
            _ => {
                return Err(TripVaultsError::validation("Missing required field: people"));
            }
        }

        match &self.interests {
            Some(interests) if !interests.is_empty() => {}
            _ => {
                return Err(TripVaultsError::validation(
                    "Missing required field: interests",
                ));
            }
        }

        // Absent language falls back to the default; an explicitly empty
        // one is a caller mistake.
        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(TripVaultsError::validation("Language must not be empty"));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or_default().trim()
    }

    /// Group description, defaulting to [`DEFAULT_GROUP_TYPE`]
    #[must_use]
    pub fn group_type(&self) -> &str {
        match self.group_type.as_deref().map(str::trim) {
            Some(group_type) if !group_type.is_empty() => group_type,
            _ => DEFAULT_GROUP_TYPE,
        }
    }

    /// Plan language, defaulting to [`DEFAULT_LANGUAGE`]
    #[must_use]
    pub fn language(&self) -> &str {
        match self.language.as_deref().map(str::trim) {
            Some(language) if !language.is_empty() => language,
            _ => DEFAULT_LANGUAGE,
        }
    }

    /// Interests joined for prompt interpolation
    #[must_use]
    pub fn interests_joined(&self) -> String {
        self.interests.as_deref().unwrap_or_default().join(", ")
    }
}

/// Successful travel-plan response body
#[derive(Debug, Serialize)]
pub struct TravelPlanResponse {
    pub plan: String,
}

/// Readiness report served at the root path
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// "set" or "not_set", depending on whether the credential was
    /// configured at startup
    pub api_key: &'static str,
}
