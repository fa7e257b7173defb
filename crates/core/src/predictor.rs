use neighborrec_shared::{RecommendError, similarity::cosine_similarity};

use crate::RatingMatrix;

/// Predict a rating for every item on behalf of `target_user`.
///
/// Each unrated item gets the similarity-weighted average of the ratings other
/// users gave it, normalised by the summed absolute similarity of those users:
///
/// `prediction[i] = Σ sim(target, u) × r[u][i] / Σ |sim(target, u)|` over `u ≠ target, r[u][i] > 0`
///
/// Items with no signal, and every item the target already rated, are `0.0`.
#[tracing::instrument(level = "debug", skip(matrix))]
pub fn predict_ratings(
  matrix: &RatingMatrix,
  target_user: usize,
) -> Result<Vec<f64>, RecommendError> {
  if matrix.is_empty() {
    return Err(RecommendError::empty("rating matrix has no users"));
  }
  let Some(target) = matrix.row(target_user) else {
    return Err(RecommendError::invalid(format!(
      "user {target_user} out of range (0..{})",
      matrix.user_count()
    )));
  };

  // Self-similarity stays `None` and never enters the aggregation.
  let similarities = matrix
    .rows()
    .enumerate()
    .map(|(user, row)| {
      if user == target_user {
        Ok(None)
      } else {
        cosine_similarity(target, row).map(Some)
      }
    })
    .collect::<Result<Vec<_>, _>>()?;

  let mut predicted = vec![0.0_f64; matrix.item_count()];
  let mut candidates = 0_usize;

  for item in matrix.unrated_items(target_user) {
    candidates += 1;
    let mut weighted_sum = 0.0_f64;
    let mut similarity_mass = 0.0_f64;

    for (row, similarity) in matrix.rows().zip(&similarities) {
      let Some(sim) = *similarity else {
        continue;
      };
      let rating = row[item];
      if rating == 0 {
        continue;
      }
      weighted_sum = sim.mul_add(f64::from(rating), weighted_sum);
      similarity_mass += sim.abs();
    }

    if similarity_mass > 0.0 {
      predicted[item] = weighted_sum / similarity_mass;
    }
  }

  tracing::debug!(
    target_user,
    users = matrix.user_count(),
    items = matrix.item_count(),
    candidates,
    "Predicted ratings"
  );

  Ok(predicted)
}
