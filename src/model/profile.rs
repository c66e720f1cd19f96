//! Influencer profile data model
//!
//! Profiles are returned by the search endpoint and are immutable once
//! fetched - the app only formats them for display or snapshots them into
//! campaigns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A city/country pair from a profile's location list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

/// One content creator's public metrics and attributes
///
/// Optional collections vary per record; fields the endpoint returns that we
/// don't model explicitly are kept in `extra` so CSV export can emit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerProfile {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub creator_type: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub followings: u64,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub avg_likes: f64,
    #[serde(default)]
    pub avg_comments: f64,
    #[serde(default)]
    pub media_count: u64,
    #[serde(default)]
    pub highlight_reel_count: u64,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_brands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_of_brands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_10_hashtags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branded_posts: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl InfluencerProfile {
    /// Username with the leading `@` stripped, for building profile URLs
    pub fn handle(&self) -> &str {
        self.username.trim_start_matches('@')
    }

    /// `"12.3%"`-style engagement display
    pub fn engagement_display(&self) -> String {
        format!("{:.1}%", self.engagement_rate)
    }

    pub fn relevance_display(&self) -> String {
        format!("{:.2}", self.relevance_score)
    }

    /// Location list as `"City, Country"` pairs joined with `", "`
    pub fn location_display(&self) -> String {
        match &self.location {
            Some(locs) if !locs.is_empty() => locs
                .iter()
                .map(|l| format!("{}, {}", l.city, l.country))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "N/A".to_string(),
        }
    }
}

/// Format a count with thousands separators (`1234567` -> `"1,234,567"`)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_profile_deserializes_with_missing_optionals() {
        let json = r#"{"username": "tech_jane", "full_name": "Jane", "followers": 120000}"#;
        let profile: InfluencerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.username, "tech_jane");
        assert_eq!(profile.followers, 120000);
        assert!(profile.interests.is_none());
        assert_eq!(profile.location_display(), "N/A");
    }

    #[test]
    fn test_unknown_fields_are_retained() {
        let json = r#"{"username": "jane", "email": "jane@example.com"}"#;
        let profile: InfluencerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.extra.get("email").and_then(Value::as_str),
            Some("jane@example.com")
        );
        // and they round-trip back out on serialization
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["email"], "jane@example.com");
    }

    #[test]
    fn test_handle_strips_at_sign() {
        let json = r#"{"username": "@jane"}"#;
        let profile: InfluencerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.handle(), "jane");
    }
}
