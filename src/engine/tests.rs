//! End-to-end tests over the view machine with scripted transports.

use crate::engine::types::{Severity, View};
use crate::engine::App;
use crate::llm::{fallback_recommendation, AdapterError, CompletionClient, Recommender};
use crate::profile::{Climate, ProfileUpdate, TagField};
use crate::wizard::WizardStep;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Replies with a fixed body, recording every prompt it was handed.
struct CannedClient {
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl CannedClient {
    fn new(reply: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply: reply.to_string(),
                prompts: Arc::clone(&prompts),
            },
            prompts,
        )
    }
}

#[async_trait]
impl CompletionClient for CannedClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call at the transport layer.
struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _prompt: &str) -> Result<String, AdapterError> {
        Err(AdapterError::Transport {
            reason: "connection error - unable to reach the API".to_string(),
        })
    }
}

/// Answers with a successful HTTP exchange that carried no usable text.
struct SilentClient;

#[async_trait]
impl CompletionClient for SilentClient {
    async fn complete(&self, _prompt: &str) -> Result<String, AdapterError> {
        Err(AdapterError::EmptyResponse)
    }
}

const VALID_REPLY: &str = r#"Sure! Here are your matches:
{"summary":"Coastal mid-sized cities suit you.","topCities":[],"insights":{},"bestOption":{}}"#;

fn filled_app<C: CompletionClient>(client: C) -> App<C> {
    let mut app = App::with_recommender(Recommender::with_client(client));
    app.get_started();
    app.apply(ProfileUpdate::Occupation("Marine Biologist".to_string()));
    app.apply(ProfileUpdate::Climate(Climate::Warm));
    app.toggle_tag(TagField::ActivityPreferences, "Beach Activities");
    app
}

async fn walk_to_last_step<C: CompletionClient>(app: &mut App<C>) {
    while app.wizard().step() != WizardStep::ValuesAndGoals {
        app.next().await;
    }
}

#[tokio::test]
async fn successful_submission_reaches_results() {
    let (client, prompts) = CannedClient::new(VALID_REPLY);
    let mut app = filled_app(client);
    walk_to_last_step(&mut app).await;

    let notice = app.next().await.expect("submission should produce a notice");

    assert_eq!(app.view(), View::Results);
    assert!(!app.loading());
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(
        app.result().map(|r| r.summary.as_str()),
        Some("Coastal mid-sized cities suit you.")
    );

    // exactly one outbound call, built from the collected profile
    let prompts = prompts.lock().expect("prompt log poisoned");
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Occupation: Marine Biologist"));
    assert!(prompts[0].contains("- Climate Preference: warm"));
    assert!(prompts[0].contains("Beach Activities"));
}

#[tokio::test]
async fn transport_failure_stays_on_the_form() {
    let mut app = filled_app(FailingClient);
    walk_to_last_step(&mut app).await;

    let notice = app.next().await.expect("failure should produce a notice");

    assert_eq!(app.view(), View::Form);
    assert!(!app.loading());
    assert!(app.result().is_none());
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.body.contains("unable to reach the API"));

    // the user stays on the last step and may resubmit manually
    assert_eq!(app.wizard().step(), WizardStep::ValuesAndGoals);
}

#[tokio::test]
async fn empty_reply_is_reported_as_an_error() {
    let mut app = filled_app(SilentClient);
    walk_to_last_step(&mut app).await;

    let notice = app.next().await.expect("failure should produce a notice");

    assert_eq!(app.view(), View::Form);
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.body.contains("no response generated"));
}

#[tokio::test]
async fn malformed_reply_degrades_to_the_fallback() {
    let (client, _) = CannedClient::new("The model rambled and returned no JSON at all.");
    let mut app = filled_app(client);
    walk_to_last_step(&mut app).await;

    let notice = app.next().await.expect("submission should produce a notice");

    // a parse failure is invisible: the flow completes with canned data
    assert_eq!(app.view(), View::Results);
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(app.result(), Some(&fallback_recommendation()));
}

#[tokio::test]
async fn leaving_the_form_discards_the_intake() {
    let (client, _) = CannedClient::new(VALID_REPLY);
    let mut app = filled_app(client);

    // back from the first step exits to the landing view
    app.previous();
    assert_eq!(app.view(), View::Landing);

    // re-entering starts a fresh profile
    app.get_started();
    assert!(app.wizard().profile().occupation.is_empty());
    assert_eq!(app.wizard().step(), WizardStep::PersonalProfile);
}

#[tokio::test]
async fn start_over_discards_profile_and_result() {
    let (client, _) = CannedClient::new(VALID_REPLY);
    let mut app = filled_app(client);
    walk_to_last_step(&mut app).await;
    app.next().await;
    assert_eq!(app.view(), View::Results);

    app.start_over();

    assert_eq!(app.view(), View::Landing);
    assert!(app.result().is_none());
    assert!(app.wizard().profile().occupation.is_empty());
}

#[tokio::test]
async fn editing_after_results_starts_a_fresh_intake() {
    let (client, _) = CannedClient::new(VALID_REPLY);
    let mut app = filled_app(client);
    walk_to_last_step(&mut app).await;
    app.next().await;
    assert_eq!(app.view(), View::Results);

    app.edit_profile();

    assert_eq!(app.view(), View::Form);
    assert_eq!(app.wizard().step(), WizardStep::PersonalProfile);
    // the previous result stays available until a new submission lands
    assert!(app.result().is_some());
}

#[tokio::test]
async fn navigation_is_ignored_outside_the_form() {
    let (client, prompts) = CannedClient::new(VALID_REPLY);
    let mut app = App::with_recommender(Recommender::with_client(client));

    // still on the landing view: form controls do nothing
    assert!(app.next().await.is_none());
    app.previous();
    app.apply(ProfileUpdate::Occupation("Ignored".to_string()));

    assert_eq!(app.view(), View::Landing);
    assert!(prompts.lock().expect("prompt log poisoned").is_empty());

    app.get_started();
    assert!(app.wizard().profile().occupation.is_empty());
}
