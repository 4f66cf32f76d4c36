//! Reply parsing, validation, and the fixed fallback payload.
//!
//! The model is asked for bare JSON but routinely wraps it in prose or
//! code fences, so the parser scans for the first top-level object (the
//! first `{` through its matching `}`) before decoding. A reply that
//! cannot be decoded, or that lacks any of the four required sections,
//! is replaced wholesale by [`fallback_recommendation`]: the user always
//! gets a complete result, and parse failures never reach the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The structured answer rendered to the user.
///
/// All four sections are required; a reply missing any of them is
/// invalid as a whole and the fallback is substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub summary: String,
    pub top_cities: Vec<RankedCity>,
    pub insights: Insights,
    pub best_option: BestOption,
}

/// One ranked entry of the city list. Individual fields are defaultable:
/// a sparse entry is better than discarding the whole reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedCity {
    pub rank: u32,
    pub city: String,
    pub country: String,
    pub score: u8,
    pub highlights: Vec<String>,
    pub lifestyle_fit: u8,
    pub career_opportunities: Vec<String>,
    pub cost_of_living: String,
    pub climate: String,
    pub population: String,
}

/// The four fixed narrative angles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Insights {
    pub climate_match: String,
    pub community: String,
    pub cost_analysis: String,
    pub personality_fit: String,
}

/// The single best pick, with a sample day as time-stamped entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BestOption {
    pub city: String,
    pub reason: String,
    pub day_in_life: Vec<String>,
}

/// Why a reply could not be used. Never escapes this module: every
/// variant collapses into the fallback at the public boundary.
#[derive(Debug, Error)]
pub(crate) enum ParseError {
    #[error("no JSON object found in the reply")]
    MissingObject,

    #[error("unbalanced braces in the reply")]
    UnbalancedBraces,

    #[error("reply JSON did not match the expected structure: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decodes the model's raw reply, substituting the fixed fallback when
/// the reply is unusable. Infallible on purpose.
pub fn parse_reply(raw: &str) -> Recommendation {
    match try_parse(raw) {
        Ok(recommendation) => {
            debug!(
                cities = recommendation.top_cities.len(),
                "decoded model reply"
            );
            recommendation
        }
        Err(error) => {
            warn!(%error, "unusable model reply, substituting fallback payload");
            fallback_recommendation()
        }
    }
}

pub(crate) fn try_parse(raw: &str) -> Result<Recommendation, ParseError> {
    let object = extract_json_object(raw)?;
    Ok(serde_json::from_str(object)?)
}

/// Returns the first top-level brace-delimited object in `text`: from the
/// first `{` through its matching `}`, skipping braces inside JSON string
/// literals and escape sequences.
fn extract_json_object(text: &str) -> Result<&str, ParseError> {
    let start = text.find('{').ok_or(ParseError::MissingObject)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(ParseError::UnbalancedBraces)
}

/// The fixed payload substituted for any unusable reply: three example
/// cities with complete field sets, identical on every call.
pub fn fallback_recommendation() -> Recommendation {
    Recommendation {
        summary: "Based on your profile, I've identified several cities that match your \
                  preferences for a balanced lifestyle with good career opportunities."
            .to_string(),
        top_cities: vec![
            RankedCity {
                rank: 1,
                city: "Austin".to_string(),
                country: "USA".to_string(),
                score: 92,
                highlights: vec![
                    "Tech Hub".to_string(),
                    "Live Music Scene".to_string(),
                    "Food Culture".to_string(),
                ],
                lifestyle_fit: 88,
                career_opportunities: vec![
                    "Tech Industry".to_string(),
                    "Startups".to_string(),
                    "Creative Roles".to_string(),
                ],
                cost_of_living: "Medium".to_string(),
                climate: "Warm".to_string(),
                population: "1M+".to_string(),
            },
            RankedCity {
                rank: 2,
                city: "Barcelona".to_string(),
                country: "Spain".to_string(),
                score: 87,
                highlights: vec![
                    "Beach Lifestyle".to_string(),
                    "Architecture".to_string(),
                    "Work-Life Balance".to_string(),
                ],
                lifestyle_fit: 85,
                career_opportunities: vec![
                    "Digital Nomad Friendly".to_string(),
                    "Tourism".to_string(),
                    "Tech".to_string(),
                ],
                cost_of_living: "Medium".to_string(),
                climate: "Mediterranean".to_string(),
                population: "1.6M".to_string(),
            },
            RankedCity {
                rank: 3,
                city: "Melbourne".to_string(),
                country: "Australia".to_string(),
                score: 83,
                highlights: vec![
                    "Coffee Culture".to_string(),
                    "Arts Scene".to_string(),
                    "Livability".to_string(),
                ],
                lifestyle_fit: 82,
                career_opportunities: vec![
                    "Finance".to_string(),
                    "Education".to_string(),
                    "Healthcare".to_string(),
                ],
                cost_of_living: "High".to_string(),
                climate: "Temperate".to_string(),
                population: "5M+".to_string(),
            },
        ],
        insights: Insights {
            climate_match: "All recommended cities offer pleasant climates suitable for \
                            outdoor activities year-round."
                .to_string(),
            community: "Each location features welcoming, diverse communities perfect for \
                        professionals."
                .to_string(),
            cost_analysis: "The cities align well with your budget, offering good value for \
                            quality of life."
                .to_string(),
            personality_fit: "These locations match your preferences for a balanced, \
                              culturally rich lifestyle."
                .to_string(),
        },
        best_option: BestOption {
            city: "Austin, USA".to_string(),
            reason: "Austin offers the perfect blend of career opportunities in tech, vibrant \
                     cultural scene, and a young, dynamic community that matches your profile."
                .to_string(),
            day_in_life: vec![
                "7:00 AM - Morning coffee at a local café".to_string(),
                "9:00 AM - Remote work from co-working space".to_string(),
                "12:00 PM - Lunch at a food truck".to_string(),
                "3:00 PM - Outdoor walk in Zilker Park".to_string(),
                "6:00 PM - Happy hour with colleagues".to_string(),
                "8:00 PM - Live music on 6th Street".to_string(),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_VALID: &str = r#"{"summary":"x","topCities":[],"insights":{},"bestOption":{}}"#;

    #[test]
    fn object_is_extracted_from_surrounding_prose() {
        let raw = format!("prefix noise {MINIMAL_VALID} suffix");
        let parsed = parse_reply(&raw);

        assert_eq!(parsed.summary, "x");
        assert!(parsed.top_cities.is_empty());
        // inner sections may be empty objects; their fields default
        assert_eq!(parsed.insights, Insights::default());
        assert_eq!(parsed.best_option, BestOption::default());
        assert_ne!(parsed, fallback_recommendation());
    }

    #[test]
    fn code_fenced_reply_is_accepted() {
        let raw = format!("```json\n{MINIMAL_VALID}\n```");
        assert_eq!(parse_reply(&raw).summary, "x");
    }

    #[test]
    fn extraction_stops_at_the_matching_brace() {
        let raw = format!("{MINIMAL_VALID} {{\"other\": true}}");
        let object = extract_json_object(&raw).unwrap();
        assert_eq!(object, MINIMAL_VALID);
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scanner() {
        let raw = r#"note {"summary":"a {weird} value","topCities":[],"insights":{},"bestOption":{}} tail"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.summary, "a {weird} value");
    }

    #[test]
    fn missing_braces_yield_the_fallback() {
        assert_eq!(parse_reply("no json here"), fallback_recommendation());
    }

    #[test]
    fn unbalanced_braces_yield_the_fallback() {
        assert_eq!(
            parse_reply(r#"{"summary":"x","topCities":["#),
            fallback_recommendation()
        );
    }

    #[test]
    fn missing_required_section_yields_the_fallback() {
        let missing_best_option = r#"{"summary":"x","topCities":[],"insights":{}}"#;
        assert_eq!(parse_reply(missing_best_option), fallback_recommendation());
    }

    #[test]
    fn malformed_json_yields_the_fallback() {
        assert_eq!(parse_reply("{not valid json}"), fallback_recommendation());
    }

    #[test]
    fn fallback_is_stable_and_complete() {
        let fallback = fallback_recommendation();
        assert_eq!(fallback, fallback_recommendation());
        assert_eq!(fallback.top_cities.len(), 3);
        assert_eq!(fallback.top_cities[0].city, "Austin");
        assert_eq!(fallback.best_option.day_in_life.len(), 6);
        assert!(!fallback.insights.climate_match.is_empty());
    }

    #[test]
    fn full_reply_round_trips() {
        let reply = r#"{
            "summary": "You thrive in mid-sized coastal cities.",
            "topCities": [{
                "rank": 1,
                "city": "Porto",
                "country": "Portugal",
                "score": 91,
                "highlights": ["Coastal", "Affordable"],
                "lifestyleFit": 89,
                "careerOpportunities": ["Tech", "Tourism"],
                "costOfLiving": "Low",
                "climate": "Mild Atlantic",
                "population": "200K+"
            }],
            "insights": {
                "climateMatch": "Mild year-round.",
                "community": "Welcoming.",
                "costAnalysis": "Well under budget.",
                "personalityFit": "Relaxed pace."
            },
            "bestOption": {
                "city": "Porto, Portugal",
                "reason": "Best balance of cost and lifestyle.",
                "dayInLife": ["8:00 AM - Espresso by the river"]
            }
        }"#;

        let parsed = parse_reply(reply);
        assert_eq!(parsed.top_cities[0].lifestyle_fit, 89);
        assert_eq!(parsed.top_cities[0].cost_of_living, "Low");
        assert_eq!(parsed.insights.cost_analysis, "Well under budget.");
        assert_eq!(
            parsed.best_option.day_in_life,
            vec!["8:00 AM - Espresso by the river".to_string()]
        );
    }
}
