//! # Atlas
//!
//! A relocation advisor: collects a lifestyle profile through a four-step
//! wizard and asks a generative-text endpoint for city recommendations.
//! The crate owns the state machines and the model contract; rendering,
//! toasts, and routing belong to the host view.
//!
//! ## Architecture
//!
//! ```text
//! Host input → wizard (Profile) → llm::send (prompt + HTTP)
//!            → external model → llm::receive (parse or fallback)
//!            → engine (view state, notices) → host view
//! ```

pub mod config;
pub mod engine;
pub mod llm;
pub mod profile;
pub mod wizard;

pub use config::{Config, ConfigError};
pub use engine::{App, Notice, Severity, View};
pub use llm::{
    AdapterError, BestOption, CompletionClient, HttpCompletionClient, Insights, RankedCity,
    Recommendation, Recommender,
};
pub use profile::{Profile, ProfileUpdate, TagField};
pub use wizard::{AdvanceOutcome, FormWizard, RetreatOutcome, WizardStep};
