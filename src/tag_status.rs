//! Per-tag verdicts and letter grades shown in reports.
//!
//! The length bands here are independent of the ones in
//! [`crate::recommendations`]; keep the two sets separate.

use crate::models::TagSet;
use crate::scorer::{OPEN_GRAPH_WEIGHTS, TWITTER_CARD_WEIGHTS};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Missing,
    Default,
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TagStatus::Excellent => "EXCELLENT",
            TagStatus::Good => "GOOD",
            TagStatus::Fair => "FAIR",
            TagStatus::Poor => "POOR",
            TagStatus::Missing => "MISSING",
            TagStatus::Default => "DEFAULT",
        };
        f.write_str(label)
    }
}

/// How many of the four essential tags of a namespace are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub present: usize,
    pub expected: usize,
}

impl Coverage {
    pub fn status(&self) -> TagStatus {
        if self.present == 0 {
            TagStatus::Missing
        } else if self.present == self.expected {
            TagStatus::Good
        } else {
            TagStatus::Fair
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnalysis {
    pub title: TagStatus,
    pub description: TagStatus,
    pub canonical: TagStatus,
    pub robots: TagStatus,
    pub open_graph: Coverage,
    pub twitter_card: Coverage,
}

impl TagAnalysis {
    pub fn new(tags: &TagSet) -> Self {
        Self {
            title: title_status(tags.title.as_deref()),
            description: description_status(tags.description.as_deref()),
            canonical: presence_status(tags.canonical.as_deref(), TagStatus::Missing),
            robots: presence_status(tags.robots.as_deref(), TagStatus::Default),
            open_graph: coverage(&tags.open_graph, &OPEN_GRAPH_WEIGHTS),
            twitter_card: coverage(&tags.twitter_card, &TWITTER_CARD_WEIGHTS),
        }
    }
}

pub fn title_status(title: Option<&str>) -> TagStatus {
    match title.filter(|t| !t.is_empty()).map(|t| t.chars().count()) {
        None => TagStatus::Missing,
        Some(50..=60) => TagStatus::Excellent,
        Some(30..=70) => TagStatus::Good,
        Some(len) if len < 30 => TagStatus::Fair,
        Some(_) => TagStatus::Poor,
    }
}

pub fn description_status(description: Option<&str>) -> TagStatus {
    match description.filter(|d| !d.is_empty()).map(|d| d.chars().count()) {
        None => TagStatus::Missing,
        Some(120..=155) => TagStatus::Excellent,
        Some(80..=165) => TagStatus::Good,
        Some(len) if len < 80 => TagStatus::Fair,
        Some(_) => TagStatus::Poor,
    }
}

fn presence_status(value: Option<&str>, when_absent: TagStatus) -> TagStatus {
    if value.is_some_and(|v| !v.is_empty()) {
        TagStatus::Good
    } else {
        when_absent
    }
}

fn coverage(tags: &BTreeMap<String, String>, essentials: &[(&str, u32)]) -> Coverage {
    Coverage {
        present: essentials
            .iter()
            .filter(|(key, _)| tags.contains_key(*key))
            .count(),
        expected: essentials.len(),
    }
}

/// Whether the robots directive keeps search engines out.
pub fn robots_restricted(robots: Option<&str>) -> bool {
    robots.is_some_and(|r| r.contains("noindex") || r.contains("nofollow"))
}

pub fn grade(score: u8) -> char {
    match score {
        90.. => 'A',
        80..=89 => 'B',
        70..=79 => 'C',
        60..=69 => 'D',
        _ => 'F',
    }
}
