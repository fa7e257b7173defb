use neighborrec_shared::RecommendError;
use serde::Serialize;

use crate::{RatingMatrix, predict_ratings};

/// A candidate item together with its predicted rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
  /// 0-based item id.
  pub item: usize,
  pub score: f64,
}

/// Rank the items `target_user` has not rated and keep the best `top_n`.
///
/// Candidates are ordered by predicted rating, highest first. Equal predictions
/// are ordered by ascending item id, so the result is fully deterministic.
#[tracing::instrument(skip(matrix))]
pub fn recommend_scored(
  matrix: &RatingMatrix,
  target_user: usize,
  top_n: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
  let predicted = predict_ratings(matrix, target_user)?;
  if predicted.is_empty() {
    return Err(RecommendError::empty(format!("no predictions for user {target_user}")));
  }

  let mut ranked: Vec<Recommendation> = matrix
    .unrated_items(target_user)
    .map(|item| Recommendation {
      item,
      score: predicted[item],
    })
    .collect();
  let candidates = ranked.len();

  ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.item.cmp(&b.item)));
  ranked.truncate(top_n);

  tracing::info!(
    target_user,
    top_n,
    candidates,
    returned = ranked.len(),
    "Recommendations ranked"
  );

  Ok(ranked)
}

/// Item ids of [`recommend_scored`], best first.
pub fn recommend(
  matrix: &RatingMatrix,
  target_user: usize,
  top_n: usize,
) -> Result<Vec<usize>, RecommendError> {
  Ok(
    recommend_scored(matrix, target_user, top_n)?
      .into_iter()
      .map(|rec| rec.item)
      .collect(),
  )
}
