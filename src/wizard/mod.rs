//! Four-step intake wizard over a single profile record.
//!
//! Steps move by one in either direction. Advancing past the last step is
//! a submission request; retreating past the first step is an exit signal
//! for the parent view. No field is required to advance: the funnel stays
//! frictionless and the model copes with sparse profiles.

use crate::profile::{Profile, ProfileUpdate, TagField};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fixed, ordered stages of profile collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    PersonalProfile,
    LifestylePreferences,
    CareerPreferences,
    ValuesAndGoals,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::PersonalProfile,
        WizardStep::LifestylePreferences,
        WizardStep::CareerPreferences,
        WizardStep::ValuesAndGoals,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::PersonalProfile => 0,
            WizardStep::LifestylePreferences => 1,
            WizardStep::CareerPreferences => 2,
            WizardStep::ValuesAndGoals => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::PersonalProfile => "Personal Profile",
            WizardStep::LifestylePreferences => "Lifestyle Preferences",
            WizardStep::CareerPreferences => "Career Preferences",
            WizardStep::ValuesAndGoals => "Values & Goals",
        }
    }

    fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// What a forward step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next step.
    Moved(WizardStep),
    /// Already on the last step: the profile is ready to submit.
    Submit,
    /// A submission is in flight; the request was ignored.
    Blocked,
}

/// What a backward step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    /// Moved to the previous step.
    Moved(WizardStep),
    /// Already on the first step: the parent should leave the form.
    Exit,
}

/// The form state machine: current step, the profile being filled in, and
/// the in-flight flag that blocks a second submission.
#[derive(Debug, Clone, Default)]
pub struct FormWizard {
    step: WizardStep,
    profile: Profile,
    loading: bool,
}

impl FormWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Merges one field update into the profile.
    pub fn apply(&mut self, update: ProfileUpdate) {
        self.profile.apply(update);
    }

    /// Flips one tag in a multi-select field.
    pub fn toggle_tag(&mut self, field: TagField, tag: &str) {
        self.profile.toggle_tag(field, tag);
    }

    /// Moves forward, or asks for submission from the last step.
    /// Ignored entirely while a submission is in flight.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.loading {
            debug!("advance ignored while submission is in flight");
            return AdvanceOutcome::Blocked;
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                debug!(step = step.title(), "advanced to next step");
                AdvanceOutcome::Moved(step)
            }
            None => AdvanceOutcome::Submit,
        }
    }

    /// Moves backward, or signals an exit from the first step.
    pub fn retreat(&mut self) -> RetreatOutcome {
        match self.step.prev() {
            Some(step) => {
                self.step = step;
                debug!(step = step.title(), "retreated to previous step");
                RetreatOutcome::Moved(step)
            }
            None => RetreatOutcome::Exit,
        }
    }

    /// Marks a submission as in flight. Returns false (and changes
    /// nothing) when one is already pending, so callers issue at most one
    /// outbound request at a time.
    pub fn begin_submission(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Clears the in-flight flag once the submission resolved either way.
    pub fn finish_submission(&mut self) {
        self.loading = false;
    }
}
