//! ReviewLens - Restaurant Review Analysis and Prompt Generation
//!
//! Collects reviews for a restaurant from Kakao Map, Google Places and Naver
//! Map, scores their sentiment, ranks keywords per aspect (맛, 서비스, 가격,
//! 분위기, 위생) and renders an owner- or consumer-facing prompt for an LLM.
//!
//! ## Quick Start
//!
//! ```ignore
//! use reviewlens::{Config, FormInput, Role, Session};
//!
//! let mut session = Session::from_config(&Config::default())?;
//! let outcome = session.submit(FormInput::new("버거킹 연세로점", Role::Owner)).await?;
//! if let Some(snapshot) = outcome.snapshot() {
//!     println!("{}", snapshot.prompt);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`collector`]: per-platform review collectors and the memoizing aggregator
//! - [`analysis`]: lexicon sentiment, aspect keywords, summaries
//! - [`prompt`]: owner and consumer prompt templates
//! - [`session`]: form cycle state machine and per-cycle snapshots
//! - [`delivery`]: prompt hand-off to an external command or the Gemini API
//! - [`config`]: layered configuration

pub mod analysis;
pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod delivery;
pub mod prompt;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader};
pub use types::error::{ErrorKind, Result, ResultExt, ReviewError};
pub use types::{Platform, RestaurantName, Review, ReviewTable, Role};

pub use analysis::{Analysis, LexiconAnalyzer, ReviewAnalyzer};
pub use collector::{Aggregator, ReviewCollector, SharedCollector};
pub use delivery::{DeliveryHandle, DeliveryReport, PromptDelivery};
pub use prompt::{PromptInput, build_prompt};
pub use session::{CycleOutcome, FormInput, Session, SessionPhase, Snapshot};
