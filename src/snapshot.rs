//! Published network analytics snapshot
//!
//! The collector job publishes one JSON document; the dashboard only reads
//! it. Every section and field defaults when absent, so a partial document
//! renders as empty sections and zero totals instead of failing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::SnapshotError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSnapshot {
    pub metadata: SnapshotMetadata,
    pub network_totals: NetworkTotals,
    pub rewards: RewardsSection,
    pub submissions: SubmissionsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMetadata {
    /// ISO-8601, with or without an offset (UTC assumed when absent)
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkTotals {
    pub total_pft_distributed: f64,
    pub unique_earners: u64,
    pub total_rewards_paid: u64,
    pub total_submissions: u64,
    pub unique_submitters: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsSection {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub daily_activity: Vec<DailyActivity>,
}

impl RewardsSection {
    /// Sparse date → PFT map. A repeated date keeps the later value.
    pub fn daily_series(&self) -> HashMap<String, f64> {
        self.daily_activity
            .iter()
            .map(|day| (day.date.clone(), day.pft))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub address: String,
    pub total_pft: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyActivity {
    pub date: String,
    pub pft: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionsSection {
    pub top_submitters: Vec<SubmitterEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitterEntry {
    pub address: String,
    pub submissions: u64,
}

impl NetworkSnapshot {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Where the dashboard gets its snapshot from (allows mocking in tests)
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<NetworkSnapshot, SnapshotError>;
}

pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(config: &DashboardConfig) -> Result<Self, SnapshotError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.snapshot_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<NetworkSnapshot, SnapshotError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status(status));
        }

        let bytes = response.bytes().await?;
        debug!("Fetched snapshot ({} bytes) from {}", bytes.len(), self.url);
        NetworkSnapshot::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpSnapshotSource {
        HttpSnapshotSource::new(&DashboardConfig {
            snapshot_url: format!("{}/data/network.json", server.uri()),
            ..DashboardConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot = NetworkSnapshot::from_slice(br#"{"network_totals": {"unique_earners": 4}}"#)
            .unwrap();

        assert_eq!(snapshot.network_totals.unique_earners, 4);
        assert_eq!(snapshot.network_totals.total_pft_distributed, 0.0);
        assert!(snapshot.rewards.leaderboard.is_empty());
        assert!(snapshot.submissions.top_submitters.is_empty());
        assert_eq!(snapshot.metadata.generated_at, None);
    }

    #[test]
    fn test_repeated_daily_date_keeps_later_value() {
        let rewards = RewardsSection {
            leaderboard: vec![],
            daily_activity: vec![
                DailyActivity { date: "2026-01-30".into(), pft: 1.0 },
                DailyActivity { date: "2026-01-30".into(), pft: 2.0 },
            ],
        };
        assert_eq!(rewards.daily_series().get("2026-01-30"), Some(&2.0));
    }

    #[tokio::test]
    async fn test_fetch_parses_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/network.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metadata": { "generated_at": "2026-01-31T18:34:00Z" },
                "network_totals": {
                    "total_pft_distributed": 1500.5, "unique_earners": 2,
                    "total_rewards_paid": 3, "total_submissions": 6, "unique_submitters": 2
                },
                "rewards": {
                    "leaderboard": [ { "address": "rA", "total_pft": 1000.0 } ],
                    "daily_activity": [ { "date": "2026-01-30", "pft": 20.0 } ]
                },
                "submissions": { "top_submitters": [ { "address": "rA", "submissions": 10 } ] }
            })))
            .mount(&server)
            .await;

        let snapshot = source_for(&server).fetch().await.unwrap();

        assert_eq!(snapshot.network_totals.total_rewards_paid, 3);
        assert_eq!(snapshot.rewards.leaderboard[0].address, "rA");
        assert_eq!(snapshot.submissions.top_submitters[0].submissions, 10);
    }

    #[tokio::test]
    async fn test_missing_document_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, SnapshotError::Status(s) if s.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }
}
