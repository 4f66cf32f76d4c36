//! The intake record collected across the wizard steps.
//!
//! Preference enums serialize to the kebab-case values the host's select
//! controls submit; tag fields are sets, so toggling is idempotent per tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const AGE_MIN: u8 = 18;
pub const AGE_MAX: u8 = 100;
pub const DEFAULT_AGE: u8 = 25;

pub const BUDGET_MIN: u32 = 500;
pub const BUDGET_MAX: u32 = 10_000;
pub const BUDGET_STEP: u32 = 250;
pub const DEFAULT_BUDGET: u32 = 2_000;

/// Checkbox catalogs the host renders for each tag field.
pub const PERSONALITY_TRAIT_OPTIONS: [&str; 8] = [
    "Adventurous",
    "Social",
    "Introverted",
    "Artistic",
    "Career-driven",
    "Nature-lover",
    "Tech-savvy",
    "Family-oriented",
];

pub const ACTIVITY_OPTIONS: [&str; 8] = [
    "Hiking",
    "Nightlife",
    "Cultural Events",
    "Tech Hubs",
    "Quiet Lifestyle",
    "Beach Activities",
    "Winter Sports",
    "Art & Museums",
];

pub const CAREER_GOAL_OPTIONS: [&str; 6] = [
    "Growth",
    "Work-Life Balance",
    "Networking",
    "Creative Freedom",
    "High Salary",
    "Job Security",
];

pub const LIFE_GOAL_OPTIONS: [&str; 6] = [
    "Personal Growth",
    "Wealth Building",
    "Social Life",
    "Learning",
    "Health & Wellness",
    "Adventure",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Education {
    HighSchool,
    Bachelor,
    Master,
    Phd,
    Professional,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::HighSchool,
        Education::Bachelor,
        Education::Master,
        Education::Phd,
        Education::Professional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Education::HighSchool => "high-school",
            Education::Bachelor => "bachelor",
            Education::Master => "master",
            Education::Phd => "phd",
            Education::Professional => "professional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Climate {
    Cold,
    Temperate,
    Warm,
    Tropical,
}

impl Climate {
    pub const ALL: [Climate; 4] = [
        Climate::Cold,
        Climate::Temperate,
        Climate::Warm,
        Climate::Tropical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Climate::Cold => "cold",
            Climate::Temperate => "temperate",
            Climate::Warm => "warm",
            Climate::Tropical => "tropical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityType {
    Urban,
    Suburban,
    Rural,
}

impl CityType {
    pub const ALL: [CityType; 3] = [CityType::Urban, CityType::Suburban, CityType::Rural];

    pub fn as_str(self) -> &'static str {
        match self {
            CityType::Urban => "urban",
            CityType::Suburban => "suburban",
            CityType::Rural => "rural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyStatus {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "couple")]
    Couple,
    #[serde(rename = "children")]
    WithChildren,
    #[serde(rename = "pets")]
    WithPets,
}

impl FamilyStatus {
    pub const ALL: [FamilyStatus; 4] = [
        FamilyStatus::Single,
        FamilyStatus::Couple,
        FamilyStatus::WithChildren,
        FamilyStatus::WithPets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FamilyStatus::Single => "single",
            FamilyStatus::Couple => "couple",
            FamilyStatus::WithChildren => "children",
            FamilyStatus::WithPets => "pets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkFlexibility {
    Remote,
    InPerson,
    Hybrid,
}

impl WorkFlexibility {
    pub const ALL: [WorkFlexibility; 3] = [
        WorkFlexibility::Remote,
        WorkFlexibility::InPerson,
        WorkFlexibility::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkFlexibility::Remote => "remote",
            WorkFlexibility::InPerson => "in-person",
            WorkFlexibility::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunityType {
    Diverse,
    TightKnit,
    Global,
    FamilyOriented,
}

impl CommunityType {
    pub const ALL: [CommunityType; 4] = [
        CommunityType::Diverse,
        CommunityType::TightKnit,
        CommunityType::Global,
        CommunityType::FamilyOriented,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommunityType::Diverse => "diverse",
            CommunityType::TightKnit => "tight-knit",
            CommunityType::Global => "global",
            CommunityType::FamilyOriented => "family-oriented",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaceOfLife {
    FastPaced,
    Moderate,
    Slow,
}

impl PaceOfLife {
    pub const ALL: [PaceOfLife; 3] = [
        PaceOfLife::FastPaced,
        PaceOfLife::Moderate,
        PaceOfLife::Slow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaceOfLife::FastPaced => "fast-paced",
            PaceOfLife::Moderate => "moderate",
            PaceOfLife::Slow => "slow",
        }
    }
}

/// The four multi-select fields of the intake record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    PersonalityTraits,
    ActivityPreferences,
    CareerGoals,
    LifeGoalFocus,
}

impl TagField {
    /// Catalog of choices the host renders for this field.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            TagField::PersonalityTraits => &PERSONALITY_TRAIT_OPTIONS,
            TagField::ActivityPreferences => &ACTIVITY_OPTIONS,
            TagField::CareerGoals => &CAREER_GOAL_OPTIONS,
            TagField::LifeGoalFocus => &LIFE_GOAL_OPTIONS,
        }
    }
}

/// One typed field mutation, merged into the record by [`Profile::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Name(String),
    Age(u8),
    Occupation(String),
    Education(Education),
    Climate(Climate),
    CityType(CityType),
    Budget(u32),
    FamilyStatus(FamilyStatus),
    WorkFlexibility(WorkFlexibility),
    IndustryRelevance(String),
    CommunityType(CommunityType),
    PaceOfLife(PaceOfLife),
    AdditionalDetails(String),
}

/// Everything the wizard collects.
///
/// `age` and `budget` always hold a value; optional fields stay `None`
/// until the user picks something and are rendered with explicit
/// placeholders by the prompt builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub age: u8,
    pub occupation: String,
    pub education: Option<Education>,
    pub personality_traits: BTreeSet<String>,
    pub climate: Option<Climate>,
    pub city_type: Option<CityType>,
    pub budget: u32,
    pub family_status: Option<FamilyStatus>,
    pub activity_preferences: BTreeSet<String>,
    pub work_flexibility: Option<WorkFlexibility>,
    pub industry_relevance: String,
    pub career_goals: BTreeSet<String>,
    pub community_type: Option<CommunityType>,
    pub pace_of_life: Option<PaceOfLife>,
    pub life_goal_focus: BTreeSet<String>,
    pub additional_details: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: None,
            age: DEFAULT_AGE,
            occupation: String::new(),
            education: None,
            personality_traits: BTreeSet::new(),
            climate: None,
            city_type: None,
            budget: DEFAULT_BUDGET,
            family_status: None,
            activity_preferences: BTreeSet::new(),
            work_flexibility: None,
            industry_relevance: String::new(),
            career_goals: BTreeSet::new(),
            community_type: None,
            pace_of_life: None,
            life_goal_focus: BTreeSet::new(),
            additional_details: None,
        }
    }
}

impl Profile {
    /// Merges one field update. Free text is trimmed; blank optional text
    /// clears the field; numeric fields are clamped to their ranges.
    pub fn apply(&mut self, update: ProfileUpdate) {
        match update {
            ProfileUpdate::Name(value) => self.name = non_blank(value),
            ProfileUpdate::Age(value) => self.age = value.clamp(AGE_MIN, AGE_MAX),
            ProfileUpdate::Occupation(value) => self.occupation = value.trim().to_string(),
            ProfileUpdate::Education(value) => self.education = Some(value),
            ProfileUpdate::Climate(value) => self.climate = Some(value),
            ProfileUpdate::CityType(value) => self.city_type = Some(value),
            ProfileUpdate::Budget(value) => self.budget = snap_budget(value),
            ProfileUpdate::FamilyStatus(value) => self.family_status = Some(value),
            ProfileUpdate::WorkFlexibility(value) => self.work_flexibility = Some(value),
            ProfileUpdate::IndustryRelevance(value) => {
                self.industry_relevance = value.trim().to_string()
            }
            ProfileUpdate::CommunityType(value) => self.community_type = Some(value),
            ProfileUpdate::PaceOfLife(value) => self.pace_of_life = Some(value),
            ProfileUpdate::AdditionalDetails(value) => self.additional_details = non_blank(value),
        }
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_tag(&mut self, field: TagField, tag: &str) {
        let set = self.tags_mut(field);
        if !set.remove(tag) {
            set.insert(tag.to_string());
        }
    }

    pub fn tags(&self, field: TagField) -> &BTreeSet<String> {
        match field {
            TagField::PersonalityTraits => &self.personality_traits,
            TagField::ActivityPreferences => &self.activity_preferences,
            TagField::CareerGoals => &self.career_goals,
            TagField::LifeGoalFocus => &self.life_goal_focus,
        }
    }

    fn tags_mut(&mut self, field: TagField) -> &mut BTreeSet<String> {
        match field {
            TagField::PersonalityTraits => &mut self.personality_traits,
            TagField::ActivityPreferences => &mut self.activity_preferences,
            TagField::CareerGoals => &mut self.career_goals,
            TagField::LifeGoalFocus => &mut self.life_goal_focus,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Rounds to the nearest slider step, then clamps to the slider range.
fn snap_budget(value: u32) -> u32 {
    let snapped = (value + BUDGET_STEP / 2) / BUDGET_STEP * BUDGET_STEP;
    snapped.clamp(BUDGET_MIN, BUDGET_MAX)
}
