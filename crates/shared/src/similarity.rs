use crate::RecommendError;

/// Compute cosine similarity between two rating vectors.
///
/// Returns a value in [-1.0, 1.0] where 1.0 means identical direction.
/// A vector with zero norm has no direction, so its similarity to anything is 0.0.
pub fn cosine_similarity(a: &[u32], b: &[u32]) -> Result<f64, RecommendError> {
  if a.is_empty() || b.is_empty() {
    return Err(RecommendError::invalid("cannot compare empty rating vectors"));
  }
  if a.len() != b.len() {
    return Err(RecommendError::invalid(format!(
      "rating vector lengths differ: {} vs {}",
      a.len(),
      b.len()
    )));
  }

  let mut dot = 0.0_f64;
  let mut norm_a = 0.0_f64;
  let mut norm_b = 0.0_f64;

  for (&x, &y) in a.iter().zip(b.iter()) {
    let x = f64::from(x);
    let y = f64::from(y);
    dot = x.mul_add(y, dot);
    norm_a = x.mul_add(x, norm_a);
    norm_b = y.mul_add(y, norm_b);
  }

  // Ratings are integers, so a nonzero norm is at least 1.
  if norm_a == 0.0 || norm_b == 0.0 {
    return Ok(0.0);
  }

  Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::RecommendErrorKind;

  const EPS: f64 = 1e-12;

  #[test]
  fn symmetric() {
    let pairs: [(&[u32], &[u32]); 3] = [
      (&[5, 3, 0], &[4, 0, 0]),
      (&[5, 3, 0], &[0, 5, 4]),
      (&[1, 2, 3, 4], &[4, 0, 2, 1]),
    ];
    for (a, b) in pairs {
      let ab = cosine_similarity(a, b).unwrap();
      let ba = cosine_similarity(b, a).unwrap();
      assert!((ab - ba).abs() < EPS, "{ab} != {ba}");
    }
  }

  #[test]
  fn self_similarity_is_one() {
    let v = [3, 0, 4, 1];
    assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < EPS);
  }

  #[test]
  fn scale_does_not_matter() {
    let sim = cosine_similarity(&[1, 2, 0], &[2, 4, 0]).unwrap();
    assert!((sim - 1.0).abs() < EPS);
  }

  #[test]
  fn known_value() {
    // dot = 20, |a| = sqrt(34), |b| = sqrt(16)
    let sim = cosine_similarity(&[5, 3, 0], &[4, 0, 0]).unwrap();
    assert!((sim - 20.0 / (34.0_f64.sqrt() * 4.0)).abs() < EPS);
  }

  #[test]
  fn disjoint_vectors_are_orthogonal() {
    assert_eq!(cosine_similarity(&[1, 0, 0], &[0, 0, 7]).unwrap(), 0.0);
  }

  #[test]
  fn zero_vector_yields_zero() {
    assert_eq!(cosine_similarity(&[0, 0, 0], &[1, 2, 3]).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&[1, 2, 3], &[0, 0, 0]).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&[0, 0], &[0, 0]).unwrap(), 0.0);
  }

  #[test]
  fn empty_is_invalid() {
    let err = cosine_similarity(&[], &[]).unwrap_err();
    assert_eq!(err.kind(), RecommendErrorKind::InvalidInput);
    let err = cosine_similarity(&[1], &[]).unwrap_err();
    assert_eq!(err.kind(), RecommendErrorKind::InvalidInput);
  }

  #[test]
  fn length_mismatch_is_invalid() {
    let err = cosine_similarity(&[1, 2], &[1, 2, 3]).unwrap_err();
    assert_eq!(
      err,
      RecommendError::invalid("rating vector lengths differ: 2 vs 3")
    );
  }
}
