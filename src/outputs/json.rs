//! JSON rendering of a digest report.
//!
//! The document carries the persona, generation time, threshold and the
//! ranked articles:
//!
//! ```text
//! {
//!   "persona": "tech_enthusiast",
//!   "generated_at": "2025-05-06T20:30:00Z",
//!   "threshold": 6,
//!   "articles": [ { "title": ..., "analysis": ..., "category": ..., ... } ]
//! }
//! ```

use crate::models::DigestReport;

/// Serialize `report` as pretty-printed JSON.
pub fn report_to_json(report: &DigestReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
