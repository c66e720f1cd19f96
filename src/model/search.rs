//! Saved search history model

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A row from the `recent_searches` table, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearch {
    pub id: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl RecentSearch {
    /// Day/month/year display, matching the dashboard's date style
    pub fn formatted_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%d/%m/%Y")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_search_deserializes() {
        let json = r#"{"id": "s1", "query": "tech influencers", "created_at": "2025-06-01T09:30:00Z"}"#;
        let search: RecentSearch = serde_json::from_str(json).unwrap();
        assert_eq!(search.query, "tech influencers");
    }
}
