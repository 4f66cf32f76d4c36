//! Prompt construction and the outbound call.
//!
//! The prompt always has the same shape: every profile line is rendered,
//! with explicit placeholders standing in for anything the user skipped,
//! followed by the JSON schema the model must answer with. Exactly one
//! HTTP round trip is made per submission: no retries, no pagination.

use crate::config::Config;
use crate::llm::AdapterError;
use crate::profile::{
    CityType, Climate, CommunityType, Education, FamilyStatus, PaceOfLife, Profile,
    WorkFlexibility,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 2048;
const API_KEY_HEADER: &str = "x-goog-api-key";

/* ---------- prompt construction ---------- */

const PROMPT_INTRO: &str = "You are a location expert helping someone find the perfect place \
to live and work. Based on the following user profile, provide personalized city/country \
recommendations.";

/// The reply contract, embedded verbatim so the model sees exact field
/// names and nesting.
const RESPONSE_FORMAT: &str = r#"Please provide your response in the following JSON format (respond with ONLY valid JSON, no additional text):

{
  "summary": "A 2-3 sentence summary understanding the user's lifestyle and what they're looking for",
  "topCities": [
    {
      "rank": 1,
      "city": "City Name",
      "country": "Country Name",
      "score": 95,
      "highlights": ["highlight1", "highlight2", "highlight3"],
      "lifestyleFit": 92,
      "careerOpportunities": ["opportunity1", "opportunity2"],
      "costOfLiving": "High/Medium/Low",
      "climate": "Climate description",
      "population": "Population range"
    },
    {
      "rank": 2,
      "city": "City Name",
      "country": "Country Name",
      "score": 88,
      "highlights": ["highlight1", "highlight2", "highlight3"],
      "lifestyleFit": 85,
      "careerOpportunities": ["opportunity1", "opportunity2"],
      "costOfLiving": "High/Medium/Low",
      "climate": "Climate description",
      "population": "Population range"
    },
    {
      "rank": 3,
      "city": "City Name",
      "country": "Country Name",
      "score": 82,
      "highlights": ["highlight1", "highlight2", "highlight3"],
      "lifestyleFit": 80,
      "careerOpportunities": ["opportunity1", "opportunity2"],
      "costOfLiving": "High/Medium/Low",
      "climate": "Climate description",
      "population": "Population range"
    }
  ],
  "insights": {
    "climateMatch": "Brief analysis of how the recommended climates match user preferences",
    "community": "Brief analysis of community aspects in recommended cities",
    "costAnalysis": "Brief analysis of cost vs budget considerations",
    "personalityFit": "Brief analysis of how the cities match the user's personality traits"
  },
  "bestOption": {
    "city": "Best recommended city name",
    "reason": "2-3 sentence explanation of why this is the best choice",
    "dayInLife": [
      "7:00 AM - Morning routine description",
      "9:00 AM - Work/career activity",
      "12:00 PM - Lunch and midday activity",
      "3:00 PM - Afternoon activity",
      "6:00 PM - Evening activity",
      "8:00 PM - Night activity"
    ]
  }
}"#;

const GUIDANCE: &str = "Focus on real cities that match the user's criteria. Consider factors like:
- Climate preferences and actual weather patterns
- Cost of living vs budget
- Industry presence and job opportunities
- Cultural fit and lifestyle preferences
- Community type and social aspects
- Quality of life factors

Provide specific, realistic recommendations with accurate information about each city.";

/// Renders the profile into the instruction document for the model.
/// Deterministic: the same profile always yields the same prompt.
pub fn build_prompt(profile: &Profile) -> String {
    let profile_block = format!(
        "USER PROFILE:
- Name: {name}
- Age: {age}
- Occupation: {occupation}
- Education: {education}
- Personality Traits: {traits}
- Climate Preference: {climate}
- City Type: {city_type}
- Budget Range: ${budget} USD/month
- Family Status: {family}
- Activity Preferences: {activities}
- Work Flexibility: {work}
- Industry Relevance: {industry}
- Career Goals: {career_goals}
- Community Type: {community}
- Pace of Life: {pace}
- Life Goal Focus: {life_goals}
- Additional Details: {details}",
        name = profile.name.as_deref().unwrap_or("Not provided"),
        age = profile.age,
        occupation = profile.occupation,
        education = profile.education.map_or("Not specified", Education::as_str),
        traits = join_or_none(&profile.personality_traits),
        climate = profile.climate.map_or("Not specified", Climate::as_str),
        city_type = profile.city_type.map_or("Not specified", CityType::as_str),
        budget = profile.budget,
        family = profile
            .family_status
            .map_or("Not specified", FamilyStatus::as_str),
        activities = join_or_none(&profile.activity_preferences),
        work = profile
            .work_flexibility
            .map_or("Not specified", WorkFlexibility::as_str),
        industry = profile.industry_relevance,
        career_goals = join_or_none(&profile.career_goals),
        community = profile
            .community_type
            .map_or("Not specified", CommunityType::as_str),
        pace = profile.pace_of_life.map_or("Not specified", PaceOfLife::as_str),
        life_goals = join_or_none(&profile.life_goal_focus),
        details = profile.additional_details.as_deref().unwrap_or("None provided"),
    );

    format!("{PROMPT_INTRO}\n\n{profile_block}\n\n{RESPONSE_FORMAT}\n\n{GUIDANCE}")
}

fn join_or_none(tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        "None specified".to_string()
    } else {
        tags.iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/* ---------- wire types ---------- */

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl<'a> GenerateRequest<'a> {
    fn for_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

/// The reply text lives at `candidates[0].content.parts[0].text`; anything
/// missing along that path means the endpoint produced nothing usable.
fn first_candidate_text(reply: GenerateResponse) -> Option<String> {
    let text = reply
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/* ---------- transport ---------- */

/// One outbound completion call.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the prompt as the sole content and returns the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError>;
}

/// The production transport: a single POST to the configured endpoint.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: Config,
}

impl HttpCompletionClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError> {
        let body = GenerateRequest::for_prompt(prompt);

        let response = self
            .client
            .post(self.config.api_url.clone())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdapterError::Transport {
                reason: describe_network_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(%status, "endpoint returned an error status");
            return Err(AdapterError::Transport {
                reason: describe_error_status(status, &detail),
            });
        }

        let reply: GenerateResponse =
            response.json().await.map_err(|e| AdapterError::Transport {
                reason: format!("failed to decode the API response: {e}"),
            })?;

        match first_candidate_text(reply) {
            Some(text) => {
                debug!(chars = text.len(), "received completion text");
                Ok(text)
            }
            None => Err(AdapterError::EmptyResponse),
        }
    }
}

fn describe_network_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout - the API took too long to respond".to_string()
    } else if error.is_connect() {
        "connection error - unable to reach the API".to_string()
    } else {
        format!("network error: {error}")
    }
}

fn describe_error_status(status: StatusCode, detail: &str) -> String {
    match status.as_u16() {
        401 => "authentication failed - check the API key".to_string(),
        403 => "access forbidden - insufficient permissions".to_string(),
        429 => "rate limit exceeded - too many requests".to_string(),
        500..=599 => format!("server error ({status}): {detail}"),
        _ => format!("HTTP error {status}: {detail}"),
    }
}
