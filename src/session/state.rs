//! Session state records and per-cycle outputs

use serde::Serialize;

use crate::types::{
    AnalysisSummary, AspectSummary, KeywordSet, Platform, RestaurantName, ReviewTable, Role,
};

/// Where the session stands after the latest submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Empty name submitted; nothing ran
    SubmittedInvalid,
    /// Valid name accepted, pipeline running
    SubmittedValidPending,
    /// Pipeline finished and a prompt is available
    SubmittedValidReady,
}

/// The two form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub role: Role,
}

impl FormInput {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPrompt {
    pub name: RestaurantName,
    pub role: Role,
    pub text: String,
}

/// Interaction bookkeeping
///
/// `prompt`, when present, always belongs to `last_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub submitted: bool,
    pub last_name: Option<RestaurantName>,
    pub prompt: Option<CachedPrompt>,
}

/// Immutable view of one completed cycle
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub name: RestaurantName,
    pub role: Role,
    pub table: ReviewTable,
    /// Name each platform reported, first-seen order
    pub platform_names: Vec<(Platform, String)>,
    /// Only shown to owners
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordSet>,
    pub summary: AnalysisSummary,
    pub aspects: Vec<AspectSummary>,
    pub prompt: String,
    /// Role the prompt was written for; differs from `role` only when
    /// prompts are reused across roles
    pub prompt_role: Role,
    /// The prompt came from the session cache
    pub prompt_reused: bool,
}

/// Result of one submission
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Validation failed; nothing was collected
    Invalid { warning: String },
    /// Every collector came back empty; analysis did not run
    NoData { name: RestaurantName, message: String },
    Ready(Box<Snapshot>),
}

impl CycleOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            CycleOutcome::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
