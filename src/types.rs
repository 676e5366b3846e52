//! Record types collected by the dialogue flows
//!
//! Every completed flow produces one of these records. They are serialized
//! to JSON under `data/user<id>/` before the generation request is issued,
//! so the record exists even when generation fails.

use serde::{Deserialize, Serialize};

/// Optional organization profile collected during onboarding.
///
/// Each step of the profile flow is skippable, so every field is optional.
/// The profile is woven into generation prompts as organization context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NgoProfile {
    pub org_name: Option<String>,
    pub org_description: Option<String>,
    pub org_activity: Option<String>,
}

impl NgoProfile {
    /// True when no field carries a value (profile fully skipped)
    pub fn is_empty(&self) -> bool {
        self.org_name.is_none() && self.org_description.is_none() && self.org_activity.is_none()
    }
}

/// Post generated from a user's own idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostIdea {
    pub topic: String,
    pub aspect: String,
    pub relevance: String,
}

/// Announcement of an upcoming event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_name: String,
    pub event_date: String,
    pub event_location: String,
    pub event_audience: String,
    pub event_details: String,
}

/// Post written in the style of an example post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostExample {
    pub post_example: String,
}

/// Image generation request (subject / background / style)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub subject: String,
    pub background: String,
    pub style: String,
}

/// Content plan request (period / theme / goals)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlanRequest {
    pub period: String,
    pub theme: String,
    pub goals: String,
}

/// Text submitted for proofreading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEditRequest {
    pub text: String,
}

/// Kind of generation record, controls the on-disk filename and the
/// tag field stamped into the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    PostIdea,
    EventInfo,
    PostExample,
    Image,
    ContentPlan,
    TextEdit,
}

impl GenerationKind {
    /// Filename stem, completed with a `_YYYYmmdd_HHMMSS.json` suffix
    pub fn file_stem(&self) -> &'static str {
        match self {
            GenerationKind::PostIdea => "text_generation_by_idea",
            GenerationKind::EventInfo => "text_generation_event_info",
            GenerationKind::PostExample => "text_generation_by_example",
            GenerationKind::Image => "image_generation",
            GenerationKind::ContentPlan => "content_plan",
            GenerationKind::TextEdit => "text_edit",
        }
    }

    /// Tag field stamped into the record JSON: (field name, value).
    ///
    /// Text generations are tagged `generation_type`, the remaining kinds
    /// use `type`, matching the historical record layout.
    pub fn json_tag(&self) -> (&'static str, &'static str) {
        match self {
            GenerationKind::PostIdea => ("generation_type", "by_idea"),
            GenerationKind::EventInfo => ("generation_type", "event_info"),
            GenerationKind::PostExample => ("generation_type", "by_example"),
            GenerationKind::Image => ("generation_type", "image"),
            GenerationKind::ContentPlan => ("type", "content_plan"),
            GenerationKind::TextEdit => ("type", "text_edit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_empty() {
        let profile = NgoProfile::default();
        assert!(profile.is_empty());

        let profile = NgoProfile {
            org_name: Some("Добрые руки".to_string()),
            ..Default::default()
        };
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = NgoProfile {
            org_name: Some("Добрые руки".to_string()),
            org_description: None,
            org_activity: Some("социальная защита".to_string()),
        };

        let json = serde_json::to_string(&profile).unwrap();
        let back: NgoProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }

    #[test]
    fn test_profile_ignores_stamp_fields() {
        // Records on disk carry timestamp/user_id stamps next to the payload
        let json = r#"{
            "org_name": "Фонд",
            "org_description": null,
            "org_activity": "медицина",
            "timestamp": "2024-05-01T10:00:00",
            "user_id": 42
        }"#;

        let profile: NgoProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.org_name.as_deref(), Some("Фонд"));
        assert_eq!(profile.org_activity.as_deref(), Some("медицина"));
    }

    #[test]
    fn test_generation_kind_file_stems() {
        assert_eq!(GenerationKind::PostIdea.file_stem(), "text_generation_by_idea");
        assert_eq!(GenerationKind::Image.file_stem(), "image_generation");
        assert_eq!(GenerationKind::ContentPlan.file_stem(), "content_plan");
    }

    #[test]
    fn test_generation_kind_json_tags() {
        assert_eq!(GenerationKind::EventInfo.json_tag(), ("generation_type", "event_info"));
        assert_eq!(GenerationKind::TextEdit.json_tag(), ("type", "text_edit"));
    }
}
