use crate::models::{Recommendation, TagSet};
use crate::scorer::{OPEN_GRAPH_WEIGHTS, TWITTER_CARD_WEIGHTS};
use std::collections::BTreeMap;

/// Builds the ordered list of improvement suggestions for a page.
///
/// Checks run in a fixed order (title, description, canonical, Open Graph,
/// Twitter Card, image dimensions) and each adds at most one entry. The
/// structured data and hreflang suggestions are always appended last.
pub fn recommend(tags: &TagSet) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // Title
    match present(&tags.title) {
        None => recommendations.push(Recommendation::new(
            "Add a page title",
            "Every page should have a unique, descriptive title tag between 50-60 characters.",
        )),
        Some(title) if title.chars().count() < 20 => recommendations.push(Recommendation::new(
            "Improve your page title",
            "Your title is too short. Aim for 50-60 characters for optimal display in search results.",
        )),
        Some(title) if title.chars().count() > 70 => recommendations.push(Recommendation::new(
            "Shorten your page title",
            "Your title is too long and may be truncated in search results. Aim for 50-60 characters.",
        )),
        Some(_) => {}
    }

    // Meta description
    match present(&tags.description) {
        None => recommendations.push(Recommendation::new(
            "Add a meta description",
            "Add a compelling meta description between 120-155 characters to improve click-through rates.",
        )),
        Some(desc) if desc.chars().count() < 70 => recommendations.push(Recommendation::new(
            "Expand your meta description",
            "Your description is too short. Aim for 120-155 characters to fully utilize this space.",
        )),
        Some(desc) if desc.chars().count() > 160 => recommendations.push(Recommendation::new(
            "Shorten your meta description",
            "Your description may be truncated in search results. Aim for 120-155 characters.",
        )),
        Some(_) => {}
    }

    if present(&tags.canonical).is_none() {
        recommendations.push(Recommendation::new(
            "Add a canonical URL",
            "Include a canonical URL to prevent duplicate content issues and consolidate ranking signals.",
        ));
    }

    if !has_all(&tags.open_graph, OPEN_GRAPH_WEIGHTS.iter().map(|(key, _)| *key)) {
        recommendations.push(Recommendation::new(
            "Add missing Open Graph tags",
            "Ensure you have og:title, og:description, og:url, and og:image tags for better social media sharing.",
        ));
    }

    if !has_all(&tags.twitter_card, TWITTER_CARD_WEIGHTS.iter().map(|(key, _)| *key)) {
        recommendations.push(Recommendation::new(
            "Add missing Twitter Card tags",
            "Implement twitter:card, twitter:title, twitter:description, and twitter:image tags for Twitter sharing.",
        ));
    }

    if !has_all(&tags.open_graph, ["og:image:width", "og:image:height"]) {
        recommendations.push(Recommendation::new(
            "Add image dimensions to Open Graph tags",
            "Include og:image:width and og:image:height properties to improve social media sharing.",
        ));
    }

    recommendations.push(Recommendation::new(
        "Add Structured Data",
        "Implement JSON-LD structured data for your business and content type to enhance rich search results.",
    ));
    recommendations.push(Recommendation::new(
        "Implement hreflang tags",
        "Add hreflang tags to specify language and regional targeting for international visitors.",
    ));

    recommendations
}

fn has_all<'a>(tags: &BTreeMap<String, String>, keys: impl IntoIterator<Item = &'a str>) -> bool {
    keys.into_iter().all(|key| tags.contains_key(key))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
