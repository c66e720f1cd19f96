//! Campaign data model
//!
//! A campaign is a user-owned named collection of influencer snapshots. The
//! snapshots are denormalized copies taken at the moment of addition, not
//! live references into a result set.

use super::profile::InfluencerProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A frozen copy of an influencer at the time it was added to a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInfluencer {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub engagement_rate: f64,
    pub added_at: DateTime<Utc>,
}

impl CampaignInfluencer {
    pub fn snapshot(profile: &InfluencerProfile, added_at: DateTime<Utc>) -> Self {
        Self {
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
            category: profile.category.clone(),
            followers: profile.followers,
            engagement_rate: profile.engagement_rate,
            added_at,
        }
    }
}

/// A row from the `campaigns` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub user_id: String,
    #[serde(default)]
    pub influencers: Vec<CampaignInfluencer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Merge `incoming` snapshots into `existing`, deduplicated by username.
///
/// Existing entries win over incoming duplicates. Deduplication is checked
/// against the existing list only - two entries with the same username
/// inside `incoming` itself are both appended if the name is new.
pub fn merge_influencers(
    mut existing: Vec<CampaignInfluencer>,
    incoming: &[CampaignInfluencer],
) -> Vec<CampaignInfluencer> {
    let known: HashSet<String> = existing.iter().map(|i| i.username.clone()).collect();
    existing.extend(
        incoming
            .iter()
            .filter(|i| !known.contains(&i.username))
            .cloned(),
    );
    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(username: &str, followers: u64) -> CampaignInfluencer {
        CampaignInfluencer {
            username: username.to_string(),
            full_name: username.to_uppercase(),
            category: "Tech".to_string(),
            followers,
            engagement_rate: 3.2,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_union() {
        let existing = vec![snap("a", 10)];
        let merged = merge_influencers(existing, &[snap("b", 20), snap("c", 30)]);
        let names: Vec<&str> = merged.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_merge_existing_entry_wins() {
        let existing = vec![snap("a", 10)];
        let merged = merge_influencers(existing, &[snap("a", 99)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].followers, 10);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let incoming = [snap("a", 10), snap("b", 20)];
        let once = merge_influencers(Vec::new(), &incoming);
        let twice = merge_influencers(once.clone(), &incoming);
        assert_eq!(once.len(), 2);
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn test_merge_checks_existing_only_not_the_batch() {
        // duplicates within the incoming batch are not collapsed
        let merged = merge_influencers(Vec::new(), &[snap("a", 10), snap("a", 20)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_campaign_deserializes_without_influencers() {
        let json = r#"{
            "id": "c1",
            "name": "Spring Launch",
            "user_id": "u1",
            "created_at": "2025-03-01T10:00:00Z",
            "updated_at": "2025-03-01T10:00:00Z"
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert!(campaign.influencers.is_empty());
    }
}
