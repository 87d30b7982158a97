//! Interaction Session
//!
//! One [`Session`] drives the form cycle: validate the name, aggregate,
//! analyze, and build (or reuse) the prompt. Each completed cycle yields an
//! immutable [`Snapshot`]; the session keeps only the bookkeeping needed to
//! decide what to reuse next time.
//!
//! ## Prompt cache
//!
//! The cached prompt is dropped whenever the submitted name changes. By
//! default it is also keyed on role; with `reuse_prompt_across_roles` a
//! prompt built for one role is served for the other.

mod state;

pub use state::{CachedPrompt, CycleOutcome, FormInput, SessionPhase, SessionState, Snapshot};

use tracing::{debug, info, warn};

use crate::analysis::{ReviewAnalyzer, create_analyzer};
use crate::collector::{Aggregator, create_collectors};
use crate::config::Config;
use crate::delivery::{DeliveryHandle, PromptDelivery};
use crate::prompt::{PromptInput, build_prompt};
use crate::types::{RestaurantName, Result, ReviewError, ReviewTable, Role};

pub struct Session {
    state: SessionState,
    phase: SessionPhase,
    aggregator: Aggregator,
    analyzer: Box<dyn ReviewAnalyzer>,
    reuse_prompt_across_roles: bool,
    exemplar_max_chars: usize,
}

impl Session {
    pub fn new(aggregator: Aggregator, analyzer: Box<dyn ReviewAnalyzer>, config: &Config) -> Self {
        Self {
            state: SessionState::default(),
            phase: SessionPhase::Idle,
            aggregator,
            analyzer,
            reuse_prompt_across_roles: config.session.reuse_prompt_across_roles,
            exemplar_max_chars: config.analysis.exemplar_max_chars,
        }
    }

    /// Session with the configured collectors and the default analyzer
    pub fn from_config(config: &Config) -> Result<Self> {
        let collectors = create_collectors(&config.collectors)?;
        let analyzer = create_analyzer(&config.analysis);
        Ok(Self::new(Aggregator::new(collectors), analyzer, config))
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Run one form cycle
    ///
    /// Validation and no-data conditions are returned as outcomes; collector
    /// and analyzer failures are returned as errors and leave the session idle.
    pub async fn submit(&mut self, form: FormInput) -> Result<CycleOutcome> {
        self.state.submitted = true;

        let name = match RestaurantName::parse(&form.name) {
            Ok(name) => name,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                self.phase = SessionPhase::SubmittedInvalid;
                return Ok(CycleOutcome::Invalid {
                    warning: e.to_string(),
                });
            }
        };

        if self.state.last_name.as_ref() != Some(&name) {
            if self.state.prompt.take().is_some() {
                debug!("Name changed to '{}', cached prompt dropped", name);
            }
            self.state.last_name = Some(name.clone());
        }

        self.phase = SessionPhase::SubmittedValidPending;
        match self.run_pipeline(name, form.role).await {
            Ok(outcome) => {
                self.phase = match outcome {
                    CycleOutcome::Ready(_) => SessionPhase::SubmittedValidReady,
                    _ => SessionPhase::Idle,
                };
                Ok(outcome)
            }
            Err(e) => {
                self.phase = SessionPhase::Idle;
                Err(e)
            }
        }
    }

    async fn run_pipeline(&mut self, name: RestaurantName, role: Role) -> Result<CycleOutcome> {
        let reviews = self.aggregator.collect_all(&name).await?;
        if reviews.is_empty() {
            let message = ReviewError::NoReviews {
                name: name.to_string(),
            }
            .to_string();
            info!("{}", message);
            return Ok(CycleOutcome::NoData { name, message });
        }

        let table = ReviewTable::from_reviews(reviews.iter().cloned());
        let analysis = self.analyzer.analyze(&table)?;

        let reusable = self.state.prompt.as_ref().filter(|cached| {
            cached.name == name && (self.reuse_prompt_across_roles || cached.role == role)
        });

        let (prompt, prompt_role, prompt_reused) = match reusable {
            Some(cached) => {
                debug!("Reusing {} prompt for '{}'", cached.role, name);
                (cached.text.clone(), cached.role, true)
            }
            None => {
                let input =
                    PromptInput::from_analysis(name.as_str(), &analysis, self.exemplar_max_chars);
                let text = build_prompt(role, &input);
                self.state.prompt = Some(CachedPrompt {
                    name: name.clone(),
                    role,
                    text: text.clone(),
                });
                (text, role, false)
            }
        };

        let platform_names = analysis.table.platform_names();
        Ok(CycleOutcome::Ready(Box::new(Snapshot {
            name,
            role,
            platform_names,
            keywords: (role == Role::Owner).then_some(analysis.keywords),
            table: analysis.table,
            summary: analysis.summary,
            aspects: analysis.aspects,
            prompt,
            prompt_role,
            prompt_reused,
        })))
    }

    /// Forget collected reviews and the prompt for the current name
    pub fn refresh(&mut self) -> bool {
        self.state.prompt = None;
        match &self.state.last_name {
            Some(name) => self.aggregator.invalidate(name),
            None => false,
        }
    }

    /// Hand the current prompt to `delivery`; only valid once a cycle is ready
    pub async fn deliver(&self, delivery: &dyn PromptDelivery) -> Result<DeliveryHandle> {
        let prompt = match (&self.phase, &self.state.prompt) {
            (SessionPhase::SubmittedValidReady, Some(prompt)) => prompt,
            _ => {
                return Err(ReviewError::InvalidState(format!(
                    "no prompt ready to send (phase: {:?})",
                    self.phase
                )));
            }
        };

        info!("Delivering {} prompt for '{}' via {}", prompt.role, prompt.name, delivery.name());
        delivery.launch(&prompt.text).await
    }
}
