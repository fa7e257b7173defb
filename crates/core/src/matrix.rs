use neighborrec_shared::RecommendError;

/// Dense user × item rating grid.
///
/// Rows are users and columns are items, both 0-based. A cell of `0` means
/// "unrated"; a genuine zero rating cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingMatrix {
  rows: Vec<Vec<u32>>,
}

impl RatingMatrix {
  /// Wrap `rows`, checking that every row has the same number of items.
  pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, RecommendError> {
    if let Some(first) = rows.first() {
      let items = first.len();
      if let Some((user, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != items) {
        return Err(RecommendError::invalid(format!(
          "user {user} has {} ratings, expected {items}",
          row.len()
        )));
      }
    }
    Ok(Self { rows })
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  #[must_use]
  pub fn user_count(&self) -> usize {
    self.rows.len()
  }

  #[must_use]
  pub fn item_count(&self) -> usize {
    self.rows.first().map_or(0, Vec::len)
  }

  #[must_use]
  pub fn row(&self, user: usize) -> Option<&[u32]> {
    self.rows.get(user).map(Vec::as_slice)
  }

  #[must_use]
  pub fn rating(&self, user: usize, item: usize) -> Option<u32> {
    self.rows.get(user).and_then(|row| row.get(item)).copied()
  }

  pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
    self.rows.iter().map(Vec::as_slice)
  }

  /// Items the user has not rated, in ascending order. Empty for an unknown user.
  pub fn unrated_items(&self, user: usize) -> impl Iterator<Item = usize> + '_ {
    self
      .row(user)
      .unwrap_or_default()
      .iter()
      .enumerate()
      .filter_map(|(item, &r)| (r == 0).then_some(item))
  }
}
