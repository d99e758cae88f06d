//! Heuristic 0-100 scores computed from an extracted [`TagSet`].
//!
//! The three sub-scores are independent of each other. Social and technical
//! scores always divide by a fixed 100 rather than by the points applicable
//! to the page. The essential social weights sum to exactly 100.

use crate::models::{Scores, TagSet};
use std::collections::BTreeMap;

const TITLE_POINTS: u32 = 40;
const DESCRIPTION_POINTS: u32 = 40;
const CANONICAL_POINTS: u32 = 20;

const FIXED_TOTAL: u32 = 100;

/// Points awarded per essential social tag.
pub const OPEN_GRAPH_WEIGHTS: [(&str, u32); 4] = [
    ("og:title", 15),
    ("og:description", 15),
    ("og:url", 10),
    ("og:image", 15),
];
pub const TWITTER_CARD_WEIGHTS: [(&str, u32); 4] = [
    ("twitter:card", 10),
    ("twitter:title", 10),
    ("twitter:description", 10),
    ("twitter:image", 15),
];

const ROBOTS_INDEX_POINTS: u32 = 50;
const ROBOTS_FOLLOW_POINTS: u32 = 30;
const ROBOTS_DEFAULT_POINTS: u32 = 60;
// Flat credit for hreflang and structured data, which are not inspected.
const UNCHECKED_TECHNICAL_POINTS: u32 = 20;

impl Scores {
    pub fn compute(tags: &TagSet) -> Self {
        let basic = basic_score(tags);
        let social = social_score(tags);
        let technical = technical_score(tags);

        Self {
            basic,
            social,
            technical,
            overall: overall_score(basic, social, technical),
        }
    }
}

/// Title, description and canonical link. Absent elements are left out of
/// the denominator; a page with none of them scores 0.
pub fn basic_score(tags: &TagSet) -> u8 {
    let mut earned = 0;
    let mut total = 0;

    if let Some(title) = present(&tags.title) {
        total += TITLE_POINTS;
        let len = title.chars().count();
        earned += if (10..=70).contains(&len) {
            TITLE_POINTS
        } else {
            TITLE_POINTS / 2
        };
    }

    if let Some(description) = present(&tags.description) {
        total += DESCRIPTION_POINTS;
        let len = description.chars().count();
        earned += if (120..=155).contains(&len) {
            DESCRIPTION_POINTS
        } else if len >= 50 {
            20
        } else {
            10
        };
    }

    if present(&tags.canonical).is_some() {
        total += CANONICAL_POINTS;
        earned += CANONICAL_POINTS;
    }

    if total == 0 {
        return 0;
    }
    percent(earned, total)
}

pub fn social_score(tags: &TagSet) -> u8 {
    let earned = weighted_presence(&tags.open_graph, &OPEN_GRAPH_WEIGHTS)
        + weighted_presence(&tags.twitter_card, &TWITTER_CARD_WEIGHTS);
    percent(earned, FIXED_TOTAL)
}

/// Robots directive plus a flat allowance. A missing robots tag means the
/// crawler defaults (index, follow) apply.
pub fn technical_score(tags: &TagSet) -> u8 {
    let mut earned = match present(&tags.robots) {
        Some(robots) => {
            let mut points = 0;
            if robots.contains("index") && !robots.contains("noindex") {
                points += ROBOTS_INDEX_POINTS;
            }
            if robots.contains("follow") && !robots.contains("nofollow") {
                points += ROBOTS_FOLLOW_POINTS;
            }
            points
        }
        None => ROBOTS_DEFAULT_POINTS,
    };
    earned += UNCHECKED_TECHNICAL_POINTS;

    percent(earned, FIXED_TOTAL)
}

pub fn overall_score(basic: u8, social: u8, technical: u8) -> u8 {
    let sum = f64::from(basic) + f64::from(social) + f64::from(technical);
    (sum / 3.0).round() as u8
}

fn weighted_presence(tags: &BTreeMap<String, String>, weights: &[(&str, u32)]) -> u32 {
    weights
        .iter()
        .filter(|(key, _)| tags.contains_key(*key))
        .map(|(_, points)| points)
        .sum()
}

fn percent(earned: u32, total: u32) -> u8 {
    (f64::from(earned) / f64::from(total) * 100.0).round() as u8
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
