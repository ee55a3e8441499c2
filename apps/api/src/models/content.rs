#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// The eight output formats. Dispatch over this enum is exhaustive everywhere
/// it appears, so a ninth format is a compile-time extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    ListingDescription,
    SocialInstagram,
    SocialFacebook,
    SocialTwitter,
    EmailCampaign,
    SmsBlast,
    VideoScript,
    AdCopy,
}

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        ContentType::ListingDescription,
        ContentType::SocialInstagram,
        ContentType::SocialFacebook,
        ContentType::SocialTwitter,
        ContentType::EmailCampaign,
        ContentType::SmsBlast,
        ContentType::VideoScript,
        ContentType::AdCopy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::ListingDescription => "listing_description",
            ContentType::SocialInstagram => "social_instagram",
            ContentType::SocialFacebook => "social_facebook",
            ContentType::SocialTwitter => "social_twitter",
            ContentType::EmailCampaign => "email_campaign",
            ContentType::SmsBlast => "sms_blast",
            ContentType::VideoScript => "video_script",
            ContentType::AdCopy => "ad_copy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Property,
    Vehicle,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Property => "property",
            SourceType::Vehicle => "vehicle",
        }
    }
}

/// Review state of a saved piece. Any status may be set at any time;
/// transitions are deliberately unvalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Draft,
    Approved,
    Published,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 3] = [
        ContentStatus::Draft,
        ContentStatus::Approved,
        ContentStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Approved => "approved",
            ContentStatus::Published => "published",
        }
    }
}

/// A saved piece of generated copy. `source_id` is an opaque reference, not a
/// foreign key: deleting the source listing leaves the row dangling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentRow {
    pub id: Uuid,
    pub user_id: String,
    pub source_type: String,
    pub source_id: String,
    pub content_type: String,
    pub tone: Option<String>,
    pub body: String,
    pub status: String,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generation audit-log row. Schema slot only; nothing in the generation
/// path writes to it yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRow {
    pub id: Uuid,
    pub user_id: String,
    pub content_id: String,
    pub model: String,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_serde_matches_as_str() {
        for content_type in ContentType::ALL {
            let json = serde_json::to_value(content_type).unwrap();
            assert_eq!(json, content_type.as_str());
            let back: ContentType =
                serde_json::from_value(serde_json::json!(content_type.as_str())).unwrap();
            assert_eq!(back, content_type);
        }
    }

    #[test]
    fn test_content_type_covers_all_eight_formats() {
        assert_eq!(ContentType::ALL.len(), 8);
    }

    #[test]
    fn test_unknown_content_type_is_rejected() {
        let result: Result<ContentType, _> =
            serde_json::from_value(serde_json::json!("social_tiktok"));
        assert!(result.is_err());
    }

    #[test]
    fn test_source_type_serde() {
        assert_eq!(
            serde_json::to_value(SourceType::Property).unwrap(),
            "property"
        );
        assert_eq!(
            serde_json::to_value(SourceType::Vehicle).unwrap(),
            "vehicle"
        );
    }

    #[test]
    fn test_content_status_defaults_to_draft() {
        assert_eq!(ContentStatus::default(), ContentStatus::Draft);
    }

    #[test]
    fn test_content_status_accepts_all_three_values() {
        for status in ContentStatus::ALL {
            let back: ContentStatus =
                serde_json::from_value(serde_json::json!(status.as_str())).unwrap();
            assert_eq!(back, status);
        }
    }
}
