use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SEO-relevant metadata extracted from one HTML document.
///
/// `open_graph`, `twitter_card` and `meta_tags` partition the document's
/// `<meta>` tags: a tag lands in exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(default)]
    pub open_graph: BTreeMap<String, String>,
    #[serde(default)]
    pub twitter_card: BTreeMap<String, String>,
    #[serde(default)]
    pub meta_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub basic: u8,
    pub social: u8,
    pub technical: u8,
    pub overall: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

impl Recommendation {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// The result of one complete analysis. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub url: String,
    #[serde(flatten)]
    pub tags: TagSet,
    pub scores: Scores,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: String,
}

/// An [`AnalysisRecord`] without its three tag maps, as served by the
/// recent-history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAnalysis {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    pub scores: Scores,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: String,
}

impl From<&AnalysisRecord> for RecentAnalysis {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            url: record.url.clone(),
            title: record.tags.title.clone(),
            description: record.tags.description.clone(),
            canonical: record.tags.canonical.clone(),
            robots: record.tags.robots.clone(),
            scores: record.scores,
            recommendations: record.recommendations.clone(),
            analyzed_at: record.analyzed_at.clone(),
        }
    }
}
