// checkflow/src/core/result.rs

//! Defines the outcome of a check (`CheckResult`) and the chain's running
//! state (`ResultCell`).

use std::fmt;
use std::sync::Arc;

/// Outcome of a single check, a node, or a whole chain.
///
/// A result is a failure when its status code is non-zero **or** it carries a
/// cause. A cause with status code `0` is still a failure.
#[derive(Clone, Default)]
pub struct CheckResult {
  status_code: i64,
  message: String,
  cause: Option<Arc<anyhow::Error>>,
}

impl CheckResult {
  /// Status code of the result a parallel node reports when one of its workers
  /// could not be joined.
  pub const INFRASTRUCTURE_FAILURE: i64 = 10001;

  /// The success value: status code `0`, empty message, no cause.
  pub fn ok() -> Self {
    Self::default()
  }

  pub fn new(status_code: i64, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
      cause: None,
    }
  }

  /// A failure identified by a non-zero status code. Use
  /// [`CheckResult::from_error`] for a failure without one.
  pub fn fail(status_code: i64, message: impl Into<String>) -> Self {
    debug_assert!(status_code != 0, "CheckResult::fail needs a non-zero status code");
    Self::new(status_code, message)
  }

  /// A failure carried only by its cause; the status code stays `0`.
  pub fn from_error(err: impl Into<anyhow::Error>) -> Self {
    let err = err.into();
    Self {
      status_code: 0,
      message: err.to_string(),
      cause: Some(Arc::new(err)),
    }
  }

  /// Maps `Ok(())` to success and `Err(e)` to [`CheckResult::from_error`].
  pub fn from_result<E: Into<anyhow::Error>>(res: Result<(), E>) -> Self {
    match res {
      Ok(()) => Self::ok(),
      Err(e) => Self::from_error(e),
    }
  }

  pub(crate) fn infrastructure_failure() -> Self {
    Self::new(Self::INFRASTRUCTURE_FAILURE, "parallel check interrupted")
  }

  pub fn with_cause(mut self, err: impl Into<anyhow::Error>) -> Self {
    self.cause = Some(Arc::new(err.into()));
    self
  }

  pub fn status_code(&self) -> i64 {
    self.status_code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn cause(&self) -> Option<&anyhow::Error> {
    self.cause.as_deref()
  }

  pub fn is_failure(&self) -> bool {
    self.status_code != 0 || self.cause.is_some()
  }

  pub fn is_success(&self) -> bool {
    !self.is_failure()
  }
}

impl fmt::Debug for CheckResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CheckResult")
      .field("status_code", &self.status_code)
      .field("message", &self.message)
      .field("cause", &self.cause.as_ref().map(|e| e.to_string()))
      .finish()
  }
}

impl fmt::Display for CheckResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "status={} msg='{}'", self.status_code, self.message)?;
    if let Some(cause) = &self.cause {
      write!(f, " cause={}", cause)?;
    }
    Ok(())
  }
}

/// Causes compare by their rendered message, since `anyhow::Error` has no equality.
impl PartialEq for CheckResult {
  fn eq(&self, other: &Self) -> bool {
    self.status_code == other.status_code
      && self.message == other.message
      && self.cause.as_ref().map(|e| e.to_string()) == other.cause.as_ref().map(|e| e.to_string())
  }
}

/// The chain's running state: the latest result written by an executed node.
///
/// Owned by the chain and lent to the walk; nodes never hold on to it.
#[derive(Debug, Default)]
pub struct ResultCell {
  current: CheckResult,
}

impl ResultCell {
  pub fn new() -> Self {
    Self { current: CheckResult::ok() }
  }

  pub fn get(&self) -> &CheckResult {
    &self.current
  }

  pub fn set(&mut self, result: CheckResult) {
    self.current = result;
  }

  pub fn into_inner(self) -> CheckResult {
    self.current
  }
}
