use std::{
  backtrace::Backtrace,
  fmt::{Debug, Display},
};

use strum::Display as StrumDisplay;
use thiserror::Error;
use tracing_error::{SpanTrace, SpanTraceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum RecommendErrorKind {
  /// Malformed vectors, an out-of-range user id or an unparsable parameter.
  #[strum(serialize = "invalid input")]
  InvalidInput,

  /// Nothing to work on: an empty matrix or an empty prediction.
  #[strum(serialize = "empty input")]
  EmptyInput,
}

/// Conditions signalled by the recommendation pipeline.
///
/// A zero-norm rating vector is not an error: its similarity is defined as 0.0.
/// The span trace is captured where the error is raised and is ignored by `==`.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct RecommendError {
  kind: RecommendErrorKind,
  message: String,
  span_trace: SpanTrace,
}

impl RecommendError {
  pub fn new<S: Into<String>>(kind: RecommendErrorKind, msg: S) -> Self {
    Self {
      kind,
      message: msg.into(),
      span_trace: SpanTrace::capture(),
    }
  }

  pub fn invalid<S: Into<String>>(msg: S) -> Self {
    Self::new(RecommendErrorKind::InvalidInput, msg)
  }

  pub fn empty<S: Into<String>>(msg: S) -> Self {
    Self::new(RecommendErrorKind::EmptyInput, msg)
  }

  #[must_use]
  pub const fn kind(&self) -> RecommendErrorKind {
    self.kind
  }

  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Spans active when the error was raised (empty without an `ErrorLayer`).
  #[must_use]
  pub const fn span_trace(&self) -> &SpanTrace {
    &self.span_trace
  }
}

impl PartialEq for RecommendError {
  fn eq(&self, other: &Self) -> bool {
    self.kind == other.kind && self.message == other.message
  }
}

impl Eq for RecommendError {}

pub struct AppError {
  err: anyhow::Error,
  span_trace: SpanTrace,
}

impl AppError {
  /// Wrap `err`, keeping the span trace of a pipeline error or capturing the current one.
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    let err = err.into();
    let span_trace = err
      .downcast_ref::<RecommendError>()
      .map(RecommendError::span_trace)
      .filter(|trace| trace.status() == SpanTraceStatus::CAPTURED)
      .cloned()
      .unwrap_or_else(SpanTrace::capture);
    Self { err, span_trace }
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  #[must_use]
  pub const fn span_trace(&self) -> &SpanTrace {
    &self.span_trace
  }

  /// The pipeline condition behind this error, if it came from the pipeline.
  #[must_use]
  pub fn recommend_error(&self) -> Option<&RecommendError> {
    self.err.downcast_ref::<RecommendError>()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // Alternate formatting keeps the anyhow context chain.
    write!(f, "{:#}", self.err)?;
    if self.span_trace.status() == SpanTraceStatus::CAPTURED {
      write!(f, "\n\nSpan trace:\n{}", self.span_trace)?;
    }
    Ok(())
  }
}

// `main` reports its error through `Debug`.
impl Debug for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}

#[cfg(test)]
mod tests {
  use anyhow::Context;
  use tracing_error::ErrorLayer;
  use tracing_subscriber::layer::SubscriberExt;

  use super::*;

  fn span_names(trace: &SpanTrace) -> Vec<&'static str> {
    let mut names = Vec::new();
    trace.with_spans(|metadata, _fields| {
      names.push(metadata.name());
      true
    });
    names
  }

  #[test]
  fn app_error_keeps_pipeline_condition() {
    let err = AppError::from(RecommendError::invalid("user 7 out of range"));
    let inner = err.recommend_error().unwrap();
    assert_eq!(inner.kind(), RecommendErrorKind::InvalidInput);
    assert_eq!(inner.message(), "user 7 out of range");
  }

  #[test]
  fn equality_ignores_span_trace() {
    assert_eq!(RecommendError::empty("no rows"), RecommendError::empty("no rows"));
    assert_ne!(RecommendError::empty("no rows"), RecommendError::invalid("no rows"));
  }

  #[test]
  fn app_error_display_includes_context() {
    let res: Result<(), RecommendError> = Err(RecommendError::empty("no rows"));
    let err = AppError::from(res.context("loading ratings").unwrap_err());
    assert_eq!(err.to_string(), "loading ratings: empty input: no rows");
  }

  #[test]
  fn app_error_captures_current_span() {
    let subscriber = tracing_subscriber::registry().with(ErrorLayer::default());
    let err = tracing::subscriber::with_default(subscriber, || {
      let _span = tracing::info_span!("read_config").entered();
      AppError::from(anyhow::anyhow!("boom"))
    });
    assert_eq!(err.span_trace().status(), SpanTraceStatus::CAPTURED);
    assert_eq!(span_names(err.span_trace()), vec!["read_config"]);
    assert!(err.to_string().starts_with("boom\n\nSpan trace:\n"));
    assert_eq!(format!("{err:?}"), err.to_string());
  }

  #[test]
  fn app_error_prefers_span_trace_of_pipeline_error() {
    let subscriber = tracing_subscriber::registry().with(ErrorLayer::default());
    let err = tracing::subscriber::with_default(subscriber, || {
      let inner = {
        let _span = tracing::info_span!("rank_items").entered();
        RecommendError::invalid("user 3 out of range")
      };
      let _outer = tracing::info_span!("main_loop").entered();
      AppError::from(inner)
    });
    assert_eq!(span_names(err.span_trace()), vec!["rank_items"]);
  }
}
