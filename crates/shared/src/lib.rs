mod error;
pub use error::{AppError, RecommendError, RecommendErrorKind};

mod env;
pub use env::{AppEnv, OutputFormat};

pub mod similarity;
