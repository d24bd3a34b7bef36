//! Job-seeker (hub) list items and their filters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubApplication {
    pub application_id: String,
    pub state: String,
    pub opening_id: String,
    pub opening_title: String,
    pub employer_name: String,
    pub employer_domain: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyCandidacy {
    pub candidacy_id: String,
    pub candidacy_state: String,
    #[serde(default)]
    pub opening_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub author_handle: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub upvotes_count: i64,
    #[serde(default)]
    pub downvotes_count: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub at: Option<String>,
}

/// Achievements are listed per hub user, identified by handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementFilter {
    pub handle: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubUserShort {
    pub handle: String,
    pub full_name: String,
    #[serde(default)]
    pub short_bio: Option<String>,
}
