use std::{env, path::PathBuf, str::FromStr};

use strum::{Display, EnumString};

use crate::RecommendError;

const DEFAULT_RATINGS_PATH: &str = "ratings.csv";
const DEFAULT_TARGET_USER: usize = 0;
const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
  pub ratings_path: PathBuf,
  /// 0-based row of the user to recommend for.
  pub target_user: usize,
  pub top_n: usize,
  pub output_format: OutputFormat,
}

impl AppEnv {
  /// Read configuration from the process environment.
  pub fn from_env() -> Result<Self, RecommendError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build configuration from an arbitrary key lookup. Unset keys fall back to defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, RecommendError>
  where
    F: Fn(&str) -> Option<String>,
  {
    Ok(Self {
      ratings_path: lookup("RATINGS_PATH")
        .map_or_else(|| PathBuf::from(DEFAULT_RATINGS_PATH), PathBuf::from),
      target_user: parse_or("TARGET_USER", &lookup, DEFAULT_TARGET_USER)?,
      top_n: parse_or("TOP_N", &lookup, DEFAULT_TOP_N)?,
      output_format: parse_or("OUTPUT_FORMAT", &lookup, OutputFormat::default())?,
    })
  }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, RecommendError>
where
  T: FromStr,
  F: Fn(&str) -> Option<String>,
{
  match lookup(key) {
    None => Ok(default),
    Some(raw) => raw
      .trim()
      .parse()
      .map_err(|_| RecommendError::invalid(format!("{key}: cannot parse {raw:?}"))),
  }
}
