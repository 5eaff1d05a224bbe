//! # Error Handling
//!
//! Error types for taskweave combinators.
//!
//! Exactly one failure surfaces per invocation, never an aggregate:
//!
//! - An individual operation fails with [`TaskError::Operation`].
//! - A join surfaces the first failed input by input order, wrapped in
//!   [`TaskError::Join`] with the input's tuple position.
//! - A pipeline surfaces the failure of whichever stage halted it, wrapped
//!   in [`TaskError::Stage`] with the stage's 0-based index.
//!
//! Failures are never silently swallowed; recovery is the stage author's
//! responsibility. No layer retries automatically.

use std::error::Error;

/// Error produced by a failed operation, join, or pipeline invocation.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
  /// An individual asynchronous operation failed.
  #[error("operation failed: {0}")]
  Operation(#[source] Box<dyn Error + Send + Sync>),

  /// A join input failed. Carries the first failure by input order.
  #[error("join input {index} failed")]
  Join {
    /// Position of the failed input in the join tuple.
    index: usize,
    /// The underlying failure.
    #[source]
    source: Box<TaskError>,
  },

  /// A pipeline stage failed, halting the chain.
  #[error("pipeline stage {index} failed")]
  Stage {
    /// 0-based index of the failed stage.
    index: usize,
    /// The underlying failure.
    #[source]
    source: Box<TaskError>,
  },
}

impl TaskError {
  /// Wraps an arbitrary error as an operation failure.
  pub fn operation<E>(source: E) -> Self
  where
    E: Into<Box<dyn Error + Send + Sync>>,
  {
    TaskError::Operation(source.into())
  }

  /// Creates an operation failure from a plain message.
  pub fn message(message: impl Into<String>) -> Self {
    TaskError::Operation(message.into().into())
  }

  pub(crate) fn join(index: usize, source: TaskError) -> Self {
    TaskError::Join {
      index,
      source: Box::new(source),
    }
  }

  pub(crate) fn stage(index: usize, source: TaskError) -> Self {
    TaskError::Stage {
      index,
      source: Box::new(source),
    }
  }

  /// The tuple position of the failed join input, if this is a join failure.
  pub fn join_index(&self) -> Option<usize> {
    match self {
      TaskError::Join { index, .. } => Some(*index),
      _ => None,
    }
  }

  /// The index of the failed pipeline stage, if this is a stage failure.
  pub fn stage_index(&self) -> Option<usize> {
    match self {
      TaskError::Stage { index, .. } => Some(*index),
      _ => None,
    }
  }

  /// Unwraps join and stage wrappers down to the original operation failure.
  pub fn root_cause(&self) -> &TaskError {
    match self {
      TaskError::Join { source, .. } | TaskError::Stage { source, .. } => source.root_cause(),
      TaskError::Operation(_) => self,
    }
  }
}
