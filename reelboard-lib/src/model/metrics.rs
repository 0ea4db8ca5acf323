//! Dashboard metrics.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Platform-wide counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_creators: u64,
    #[serde(default)]
    pub total_films: u64,
    #[serde(default)]
    pub total_playlists: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub top_films: Vec<TopFilm>,
    #[serde(default)]
    pub daily_views: Vec<DailyCount>,
}

/// A film ranked by views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopFilm {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub views: u64,
}

/// One point of a per-day series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}
