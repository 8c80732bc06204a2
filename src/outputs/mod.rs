//! Output generation for console, Markdown and JSON.
//!
//! # Submodules
//!
//! - [`console`]: plain-text blocks for the terminal
//! - [`markdown`]: highlights plus per-category sections
//! - [`json`]: the digest report for programmatic consumers
//!
//! # Output Structure
//!
//! Without `--output-dir` the rendered digest goes to stdout. With it, one
//! file per persona is written:
//!
//! ```text
//! output_dir/
//! ├── 2025-05-06_tech_enthusiast.md
//! └── 2025-05-06_finance_guru.md
//! ```

pub mod console;
pub mod json;
pub mod markdown;

use crate::models::DigestReport;
use clap::ValueEnum;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// How a digest is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Console,
    Markdown,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Console => "txt",
            Format::Markdown => "md",
            Format::Json => "json",
        }
    }
}

/// Render `report` in `format`.
pub fn render(format: Format, report: &DigestReport) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        Format::Console => console::digest_to_text(report.persona, &report.articles),
        Format::Markdown => markdown::digest_to_markdown(report.persona, &report.articles),
        Format::Json => json::report_to_json(report)?,
    })
}

/// File name for `report` in `format`, e.g. `2025-05-06_tech_enthusiast.md`.
pub fn file_name(format: Format, report: &DigestReport) -> String {
    format!(
        "{}_{}.{}",
        report.generated_at.date_naive(),
        report.persona.key(),
        format.extension()
    )
}

/// Render `report` and write it under `output_dir`. Returns the written path.
#[instrument(level = "info", skip_all, fields(%output_dir, persona = %report.persona))]
pub async fn write_report(
    output_dir: &str,
    format: Format,
    report: &DigestReport,
) -> Result<String, Box<dyn Error>> {
    let body = render(format, report)?;
    let path = format!("{}/{}", output_dir.trim_end_matches('/'), file_name(format, report));
    fs::write(&path, body).await?;
    info!(%path, articles = report.articles.len(), "Wrote digest");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Persona;
    use chrono::{TimeZone, Utc};

    fn report() -> DigestReport {
        DigestReport {
            persona: Persona::FinanceGuru,
            generated_at: Utc.with_ymd_and_hms(2025, 5, 6, 8, 0, 0).unwrap(),
            threshold: 6,
            articles: vec![],
            feeds: vec![],
            analyses: vec![],
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Format::Markdown, &report()), "2025-05-06_finance_guru.md");
        assert_eq!(file_name(Format::Json, &report()), "2025-05-06_finance_guru.json");
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let report = report();
        assert!(render(Format::Console, &report).unwrap().contains("=== Newsletter for Finance Guru ==="));
        assert!(render(Format::Markdown, &report).unwrap().starts_with("# AI-Powered News Digest for Finance Guru"));
        assert!(render(Format::Json, &report).unwrap().contains("\"persona\": \"finance_guru\""));
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = std::env::temp_dir().join(format!("awful_digest_write_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_string_lossy().to_string();

        let path = write_report(&dir_str, Format::Markdown, &report()).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(path.ends_with("2025-05-06_finance_guru.md"));
        assert!(written.starts_with("# AI-Powered News Digest for Finance Guru"));
    }
}
