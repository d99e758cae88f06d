//! Runs the full pipeline for one URL: fetch, extract, score, recommend,
//! validate, store.

use crate::error::{AnalysisError, Result};
use crate::extractor::extract;
use crate::history::HistoryStore;
use crate::models::{AnalysisRecord, Scores};
use crate::recommendations::recommend;
use crate::scorer::overall_score;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// Source of raw page HTML.
pub trait Fetcher {
    /// Fetches `url` once. Non-success statuses and transport failures are
    /// reported as [`AnalysisError::Fetch`].
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

impl<T: Fetcher + Send + Sync> Fetcher for Arc<T> {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>> + Send {
        (**self).fetch(url)
    }
}

pub struct Analyzer<F, H> {
    fetcher: F,
    history: H,
}

impl<F: Fetcher, H: HistoryStore> Analyzer<F, H> {
    pub fn new(fetcher: F, history: H) -> Self {
        Self { fetcher, history }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Analyzes the page behind `raw_url` and records the result.
    ///
    /// Nothing is stored unless a complete, valid record was produced.
    pub async fn analyze(&self, raw_url: &str) -> Result<AnalysisRecord> {
        let formatted = normalize_url(raw_url)?;
        let target = parse_target(&formatted)?;

        tracing::info!(url = %formatted, "Analyzing page");

        let html = self.fetcher.fetch(&target).await.inspect_err(|e| {
            tracing::warn!(url = %formatted, error = %e, "Failed to fetch page");
        })?;

        let record = analyze_html(&formatted, &html);

        if let Err(errors) = validate_record(&record) {
            tracing::error!(url = %formatted, ?errors, "Assembled record failed validation");
            return Err(AnalysisError::Validation(errors));
        }

        self.history.save(record.clone());
        tracing::debug!(
            url = %record.url,
            overall = record.scores.overall,
            recommendations = record.recommendations.len(),
            "Analysis stored"
        );

        Ok(record)
    }
}

/// Trims the input and prefixes `https://` unless it already names an HTTP(S) scheme.
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Input("URL is required".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{}", trimmed))
    }
}

fn parse_target(formatted: &str) -> Result<Url> {
    let url = Url::parse(formatted)
        .map_err(|e| AnalysisError::Input(format!("Invalid URL '{}': {}", formatted, e)))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AnalysisError::Input(format!(
            "Invalid URL '{}': missing host",
            formatted
        )));
    }

    Ok(url)
}

/// The pure part of the pipeline: builds a record from already fetched HTML.
pub fn analyze_html(url: &str, html: &str) -> AnalysisRecord {
    let tags = extract(html);
    let scores = Scores::compute(&tags);
    let recommendations = recommend(&tags);

    AnalysisRecord {
        url: url.to_string(),
        tags,
        scores,
        recommendations,
        analyzed_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Checks the invariants every stored record must satisfy, returning one
/// message per violation.
pub fn validate_record(record: &AnalysisRecord) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match Url::parse(&record.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(format!("url: unsupported scheme '{}'", url.scheme())),
        Err(e) => errors.push(format!("url: {}", e)),
    }

    let scores = &record.scores;
    for (name, value) in [
        ("basic", scores.basic),
        ("social", scores.social),
        ("technical", scores.technical),
        ("overall", scores.overall),
    ] {
        if value > 100 {
            errors.push(format!("scores.{}: {} is out of range", name, value));
        }
    }
    let expected = overall_score(scores.basic, scores.social, scores.technical);
    if scores.overall != expected {
        errors.push(format!(
            "scores.overall: expected {}, found {}",
            expected, scores.overall
        ));
    }

    if let Some(key) = record.tags.open_graph.keys().find(|k| !k.starts_with("og:")) {
        errors.push(format!("openGraph: unexpected key '{}'", key));
    }
    if let Some(key) = record
        .tags
        .twitter_card
        .keys()
        .find(|k| !k.starts_with("twitter:"))
    {
        errors.push(format!("twitterCard: unexpected key '{}'", key));
    }

    for (idx, rec) in record.recommendations.iter().enumerate() {
        if rec.title.is_empty() || rec.description.is_empty() {
            errors.push(format!("recommendations[{}]: empty title or description", idx));
        }
    }

    if chrono::DateTime::parse_from_rfc3339(&record.analyzed_at).is_err() {
        errors.push(format!("analyzedAt: '{}' is not RFC 3339", record.analyzed_at));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
