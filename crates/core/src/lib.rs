mod matrix;
pub use matrix::RatingMatrix;

mod predictor;
pub use predictor::predict_ratings;

mod recommender;
pub use recommender::{Recommendation, recommend, recommend_scored};
