use crate::models::AnalysisRecord;
use crate::tag_status::{Coverage, TagAnalysis, TagStatus, grade, robots_restricted};
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn print_text_report(record: &AnalysisRecord) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "SEO Tag Inspector - Analysis Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), record.url);
        println!(
            "{}: {}",
            "Analyzed at".bright_white().bold(),
            record.analyzed_at
        );
        println!();

        // Scores
        println!("{}", "Scores".bright_yellow().bold().underline());
        let scores = &record.scores;
        println!("  Overall:   {}", Self::format_score(scores.overall));
        println!("  Basic:     {}", Self::format_score(scores.basic));
        println!("  Social:    {}", Self::format_score(scores.social));
        println!("  Technical: {}", Self::format_score(scores.technical));
        println!();

        // Tag analysis
        let tags = &record.tags;
        let analysis = TagAnalysis::new(tags);
        println!("{}", "Tag Analysis".bright_yellow().bold().underline());

        Self::print_tag(
            "Title",
            analysis.title,
            tags.title
                .as_ref()
                .map(|t| format!("{} ({} chars, recommended: 50-60)", t, t.chars().count())),
        );
        Self::print_tag(
            "Meta Description",
            analysis.description,
            tags.description.as_ref().map(|d| {
                format!(
                    "{} ({} chars, recommended: 120-155)",
                    Self::truncate(d, 100),
                    d.chars().count()
                )
            }),
        );
        Self::print_tag("Canonical URL", analysis.canonical, tags.canonical.clone());
        Self::print_tag(
            "Open Graph",
            analysis.open_graph.status(),
            Some(Self::coverage_message("Open Graph", analysis.open_graph)),
        );
        Self::print_tag(
            "Twitter Card",
            analysis.twitter_card.status(),
            Some(Self::coverage_message("Twitter Card", analysis.twitter_card)),
        );

        let robots_detail = match tags.robots.as_deref() {
            Some(robots) if robots_restricted(Some(robots)) => {
                format!("{} (page is restricted from search engines)", robots)
            }
            Some(robots) => format!("{} (page is accessible to search engines)", robots),
            None => "No robots meta tag found (default is index, follow)".to_string(),
        };
        Self::print_tag("Robots", analysis.robots, Some(robots_detail));
        println!();

        // Recommendations
        println!("{}", "Recommendations".bright_yellow().bold().underline());
        for (idx, rec) in record.recommendations.iter().enumerate() {
            println!("  {}. {}", idx + 1, rec.title.bright_white().bold());
            println!("     {}", rec.description.dimmed());
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report(record: &AnalysisRecord, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }

    fn print_tag(label: &str, status: TagStatus, detail: Option<String>) {
        println!(
            "  {} [{}]",
            format!("{:<18}", label).bright_white().bold(),
            Self::format_status(status)
        );
        if let Some(detail) = detail {
            println!("    {}", detail);
        }
    }

    fn format_status(status: TagStatus) -> ColoredString {
        let label = status.to_string();
        match status {
            TagStatus::Excellent | TagStatus::Good => label.bright_green(),
            TagStatus::Fair | TagStatus::Poor => label.yellow(),
            TagStatus::Missing => label.bright_red(),
            TagStatus::Default => label.bright_cyan(),
        }
    }

    fn format_score(score: u8) -> ColoredString {
        let text = format!("{:>3}/100 ({})", score, grade(score));
        if score >= 80 {
            text.bright_green()
        } else if score >= 60 {
            text.yellow()
        } else {
            text.bright_red()
        }
    }

    pub fn coverage_message(namespace: &str, coverage: Coverage) -> String {
        match coverage.status() {
            TagStatus::Missing => format!("No {} tags found", namespace),
            TagStatus::Good => format!(
                "All essential {} tags present ({}/{})",
                namespace, coverage.present, coverage.expected
            ),
            _ => format!(
                "{} of {} essential {} tags present",
                coverage.present, coverage.expected, namespace
            ),
        }
    }

    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}
