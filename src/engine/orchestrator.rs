//! High-level coordinator: landing → form → submission → results.

use crate::config::Config;
use crate::engine::types::{Notice, View};
use crate::llm::{CompletionClient, HttpCompletionClient, Recommendation, Recommender};
use crate::profile::{ProfileUpdate, TagField};
use crate::wizard::{AdvanceOutcome, FormWizard, RetreatOutcome};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One user session: the current view, the wizard lifecycle, and the last
/// result. Leaving the form discards the profile being collected, the
/// same way the hosting page drops the form when it navigates away.
pub struct App<C: CompletionClient> {
    view: View,
    wizard: FormWizard,
    result: Option<Recommendation>,
    recommender: Recommender<C>,
}

impl App<HttpCompletionClient> {
    pub fn new(config: Config) -> Self {
        Self::with_recommender(Recommender::new(config))
    }
}

impl<C: CompletionClient> App<C> {
    /// Builds a session around an alternative transport.
    pub fn with_recommender(recommender: Recommender<C>) -> Self {
        Self {
            view: View::Landing,
            wizard: FormWizard::new(),
            result: None,
            recommender,
        }
    }

    /* ---------- read accessors ---------- */

    pub fn view(&self) -> View {
        self.view
    }

    pub fn wizard(&self) -> &FormWizard {
        &self.wizard
    }

    pub fn result(&self) -> Option<&Recommendation> {
        self.result.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.wizard.loading()
    }

    /* ---------- navigation ---------- */

    /// Landing → form, starting a fresh intake.
    pub fn get_started(&mut self) {
        if self.view == View::Landing {
            self.wizard = FormWizard::new();
            self.view = View::Form;
        }
    }

    /// Results → form. A fresh intake begins; the submitted profile was
    /// consumed by the submission that produced the current result.
    pub fn edit_profile(&mut self) {
        if self.view == View::Results {
            self.wizard = FormWizard::new();
            self.view = View::Form;
        }
    }

    /// Anywhere → landing, discarding both the profile and the result.
    pub fn start_over(&mut self) {
        debug!("session restarted");
        self.wizard = FormWizard::new();
        self.result = None;
        self.view = View::Landing;
    }

    /* ---------- form interaction ---------- */

    pub fn apply(&mut self, update: ProfileUpdate) {
        if self.view == View::Form {
            self.wizard.apply(update);
        }
    }

    pub fn toggle_tag(&mut self, field: TagField, tag: &str) {
        if self.view == View::Form {
            self.wizard.toggle_tag(field, tag);
        }
    }

    /// The form's Next/Submit control. Steps forward, or submits from the
    /// last step. Returns a notice for the host to toast, if any.
    pub async fn next(&mut self) -> Option<Notice> {
        if self.view != View::Form {
            return None;
        }

        match self.wizard.advance() {
            AdvanceOutcome::Moved(_) | AdvanceOutcome::Blocked => None,
            AdvanceOutcome::Submit => self.submit().await,
        }
    }

    /// The form's Back control. Steps backward, or returns to the landing
    /// view (discarding the intake) from the first step.
    pub fn previous(&mut self) {
        if self.view != View::Form {
            return;
        }

        if let RetreatOutcome::Exit = self.wizard.retreat() {
            self.wizard = FormWizard::new();
            self.view = View::Landing;
        }
    }

    /* ---------- submission ---------- */

    async fn submit(&mut self) -> Option<Notice> {
        if !self.wizard.begin_submission() {
            return None;
        }

        let submission_id = Uuid::new_v4();
        // snapshot: the profile is frozen the moment it is handed over
        let profile = self.wizard.profile().clone();
        info!(%submission_id, "submitting profile for recommendations");

        let outcome = self.recommender.recommend(&profile).await;
        self.wizard.finish_submission();

        match outcome {
            Ok(recommendation) => {
                info!(%submission_id, "recommendations ready");
                self.result = Some(recommendation);
                self.view = View::Results;
                Some(Notice::info(
                    "Recommendations ready!",
                    "Your personalized location recommendations have been generated.",
                ))
            }
            Err(error) => {
                warn!(%submission_id, %error, "recommendation request failed");
                Some(Notice::error("Error", &error.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::AdapterError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingClient {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CompletionClient for CountingClient {
        async fn complete(&self, _prompt: &str) -> Result<String, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"summary":"ok","topCities":[],"insights":{},"bestOption":{}}"#.to_string())
        }
    }

    #[tokio::test]
    async fn pending_submission_blocks_a_second_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = App::with_recommender(Recommender::with_client(CountingClient {
            calls: Arc::clone(&calls),
        }));

        app.get_started();
        for _ in 0..3 {
            app.next().await;
        }

        // first submission is in flight
        assert!(app.wizard.begin_submission());
        assert!(app.loading());

        // hammering Submit must not issue another outbound call
        assert!(app.next().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // once it resolves, a manual resubmit goes through
        app.wizard.finish_submission();
        app.next().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
