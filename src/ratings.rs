use std::{fs, path::Path};

use anyhow::{Context, bail};
use neighborrec_core::RatingMatrix;
use neighborrec_shared::AppError;

/// Load a rating matrix from a comma-delimited file, one user per line.
#[tracing::instrument]
pub fn load_ratings(path: &Path) -> Result<RatingMatrix, AppError> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("could not open ratings file {}", path.display()))?;
  let matrix =
    parse_ratings(&content).with_context(|| format!("invalid ratings file {}", path.display()))?;

  tracing::info!(
    users = matrix.user_count(),
    items = matrix.item_count(),
    "Loaded ratings"
  );

  Ok(matrix)
}

/// Parse comma-delimited rows of non-negative integers.
///
/// A single trailing comma on a row is accepted. Blank lines are only allowed
/// at the end of the input.
pub fn parse_ratings(content: &str) -> anyhow::Result<RatingMatrix> {
  let lines: Vec<&str> = content.lines().collect();
  let used = lines
    .iter()
    .rposition(|line| !line.trim().is_empty())
    .map_or(0, |last| last + 1);

  let mut rows: Vec<Vec<u32>> = Vec::with_capacity(used);

  for (idx, line) in lines[..used].iter().enumerate() {
    let line_no = idx + 1;
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line);
    if line.is_empty() {
      bail!("line {line_no}: no ratings");
    }

    let row = line
      .split(',')
      .map(|cell| {
        cell
          .trim()
          .parse::<u32>()
          .with_context(|| format!("line {line_no}: cannot parse rating {cell:?}"))
      })
      .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(first) = rows.first()
      && first.len() != row.len()
    {
      bail!(
        "line {line_no}: expected {} columns, found {}",
        first.len(),
        row.len()
      );
    }
    rows.push(row);
  }

  if rows.is_empty() {
    bail!("ratings file is empty");
  }

  Ok(RatingMatrix::new(rows)?)
}
