use std::fmt::Write;

use neighborrec_core::Recommendation;
use neighborrec_shared::OutputFormat;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RecommendationReport<'a> {
  user: usize,
  top_n: usize,
  items: &'a [Recommendation],
}

/// Render recommendations for display.
///
/// Text output numbers movies from 1 and keeps the 0-based user id it was given.
/// JSON output carries the raw 0-based ids.
pub fn render(
  recommendations: &[Recommendation],
  target_user: usize,
  top_n: usize,
  format: OutputFormat,
) -> anyhow::Result<String> {
  match format {
    OutputFormat::Text => {
      let mut out = String::new();
      let _ = writeln!(out, "Top {top_n} recommended movies for User {target_user}:");
      for rec in recommendations {
        let _ = writeln!(out, "Movie {}", rec.item + 1);
      }
      Ok(out)
    }
    OutputFormat::Json => {
      let report = RecommendationReport {
        user: target_user,
        top_n,
        items: recommendations,
      };
      Ok(serde_json::to_string_pretty(&report)?)
    }
  }
}
