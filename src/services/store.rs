//! Client for the hosted relational backend
//!
//! Speaks the backend's table REST surface (`/rest/v1`) for the two tables
//! the app owns: `recent_searches` and `campaigns`. Every read and write is
//! filtered by the signed-in user's id; the backend's row-level policies
//! enforce the same scoping server-side.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::model::{Campaign, CampaignInfluencer, RecentSearch, Session};
use crate::services::error::ApiError;

pub struct StoreClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl StoreClient {
    /// Create a client against the backend's `/rest/v1` surface.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest` client cannot
    /// be constructed.
    pub fn new(backend_url: &str, anon_key: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scout-tui/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", backend_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        session: &Session,
        url: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .query(query)
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// The ten newest saved searches for the signed-in user.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`], [`ApiError::Http`] or [`ApiError::Deserialize`]
    /// per the usual taxonomy.
    pub fn recent_searches(&self, session: &Session) -> Result<Vec<RecentSearch>, ApiError> {
        self.get_json(
            session,
            &self.table_url("recent_searches"),
            &[
                ("select", "id,query,created_at"),
                ("user_id", &format!("eq.{}", session.user.id)),
                ("order", "created_at.desc"),
                ("limit", "10"),
            ],
            "recent_searches",
        )
    }

    /// Append `query` to the user's search history.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] or [`ApiError::Http`] - callers treat history
    /// writes as best-effort.
    pub fn save_search(&self, session: &Session, query: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.table_url("recent_searches"))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!([{
                "query": query,
                "user_id": session.user.id,
            }]))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }
        Ok(())
    }

    /// All campaigns owned by the signed-in user, newest first.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`], [`ApiError::Http`] or [`ApiError::Deserialize`].
    pub fn campaigns(&self, session: &Session) -> Result<Vec<Campaign>, ApiError> {
        self.get_json(
            session,
            &self.table_url("campaigns"),
            &[
                ("select", "*"),
                ("user_id", &format!("eq.{}", session.user.id)),
                ("order", "created_at.desc"),
            ],
            "campaigns",
        )
    }

    /// Create an empty campaign named `name`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] or [`ApiError::Http`].
    pub fn create_campaign(&self, session: &Session, name: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.table_url("campaigns"))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!([{
                "name": name,
                "user_id": session.user.id,
            }]))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }
        Ok(())
    }

    /// The current influencer list of one campaign.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] with status 404 when the campaign does not
    /// exist (or is not visible to this user), otherwise the usual
    /// taxonomy.
    pub fn campaign_influencers(
        &self,
        session: &Session,
        campaign_id: &str,
    ) -> Result<Vec<CampaignInfluencer>, ApiError> {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            influencers: Vec<CampaignInfluencer>,
        }

        let rows: Vec<Row> = self.get_json(
            session,
            &self.table_url("campaigns"),
            &[
                ("select", "influencers"),
                ("id", &format!("eq.{campaign_id}")),
                ("user_id", &format!("eq.{}", session.user.id)),
            ],
            "campaign_influencers",
        )?;

        rows.into_iter()
            .next()
            .map(|row| row.influencers)
            .ok_or(ApiError::Status {
                status: 404,
                message: format!("campaign {campaign_id} not found"),
            })
    }

    /// Replace a campaign's influencer list.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] or [`ApiError::Http`].
    pub fn set_campaign_influencers(
        &self,
        session: &Session,
        campaign_id: &str,
        influencers: &[CampaignInfluencer],
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.table_url("campaigns"))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .query(&[
                ("id", format!("eq.{campaign_id}")),
                ("user_id", format!("eq.{}", session.user.id)),
            ])
            .json(&serde_json::json!({ "influencers": influencers }))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }
        Ok(())
    }
}
