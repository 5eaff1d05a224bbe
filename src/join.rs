//! # Join Combinator
//!
//! Runs an ordered tuple of operations concurrently and produces one tuple
//! of results preserving positional order.
//!
//! Every input starts executing as soon as the join is polled; the join
//! settles only after every input has settled. On all-success the output
//! tuple's element `i` is the resolved value of input `i`, independent of
//! completion order, so callers never correlate results back to inputs by
//! timing. If one or more inputs fail, the first failure by input order is
//! surfaced; in-flight siblings are not cancelled and run to completion,
//! their eventual results discarded.
//!
//! Already-available values are lifted with [`value`]; [`fail`] builds a
//! settled failure.
//!
//! ```rust
//! use taskweave::{join, value, TaskError};
//!
//! async fn double(n: i32) -> Result<i32, TaskError> {
//!   Ok(n * 2)
//! }
//!
//! # futures::executor::block_on(async {
//! let (n, doubled) = join((value(5), double(5))).await?;
//! assert_eq!((n, doubled), (5, 10));
//! # Ok::<(), TaskError>(())
//! # }).unwrap();
//! ```

use std::future::Future;

use futures::future::{self, Ready};
use tracing::debug;

use crate::error::TaskError;

/// Lifts an already-available value into a settled successful operation.
pub fn value<T>(value: T) -> Ready<Result<T, TaskError>> {
  future::ready(Ok(value))
}

/// Builds a settled failed operation.
pub fn fail<T>(error: TaskError) -> Ready<Result<T, TaskError>> {
  future::ready(Err(error))
}

/// Ordered tuples of operations that can run concurrently as one join.
///
/// Implemented for tuples of futures up to arity 8, each resolving to
/// `Result<T, TaskError>`.
pub trait JoinInputs {
  /// Tuple of resolved values; position `i` matches input `i`.
  type Output;

  /// Runs every input concurrently and settles once all of them have.
  fn join(self) -> impl Future<Output = Result<Self::Output, TaskError>> + Send;
}

/// Runs an ordered tuple of operations concurrently, preserving positions.
///
/// Free-function form of [`JoinInputs::join`].
pub fn join<I>(inputs: I) -> impl Future<Output = Result<I::Output, TaskError>> + Send
where
  I: JoinInputs,
{
  inputs.join()
}

impl<F0, T0> JoinInputs for (F0,)
where
  F0: Future<Output = Result<T0, TaskError>> + Send,
  T0: Send,
{
  type Output = (T0,);

  fn join(self) -> impl Future<Output = Result<Self::Output, TaskError>> + Send {
    async move {
      match self.0.await {
        Ok(resolved) => Ok((resolved,)),
        Err(source) => {
          debug!(index = 0, "join input failed");
          Err(TaskError::join(0, source))
        }
      }
    }
  }
}

macro_rules! impl_join_inputs {
  ($(($F:ident, $T:ident, $slot:ident, $index:tt)),+) => {
    impl<$($F, $T,)+> JoinInputs for ($($F,)+)
    where
      $($F: Future<Output = Result<$T, TaskError>> + Send,)+
      $($T: Send,)+
    {
      type Output = ($($T,)+);

      fn join(self) -> impl Future<Output = Result<Self::Output, TaskError>> + Send {
        let ($($slot,)+) = self;
        async move {
          // Drives every input to completion before inspecting any result;
          // checking in input order makes the first failure deterministic.
          let ($($slot,)+) = futures::join!($($slot),+);
          $(
            let $slot = match $slot {
              Ok(resolved) => resolved,
              Err(source) => {
                debug!(index = $index, "join input failed");
                return Err(TaskError::join($index, source));
              }
            };
          )+
          Ok(($($slot,)+))
        }
      }
    }
  };
}

impl_join_inputs!((F0, T0, s0, 0), (F1, T1, s1, 1));
impl_join_inputs!((F0, T0, s0, 0), (F1, T1, s1, 1), (F2, T2, s2, 2));
impl_join_inputs!(
  (F0, T0, s0, 0),
  (F1, T1, s1, 1),
  (F2, T2, s2, 2),
  (F3, T3, s3, 3)
);
impl_join_inputs!(
  (F0, T0, s0, 0),
  (F1, T1, s1, 1),
  (F2, T2, s2, 2),
  (F3, T3, s3, 3),
  (F4, T4, s4, 4)
);
impl_join_inputs!(
  (F0, T0, s0, 0),
  (F1, T1, s1, 1),
  (F2, T2, s2, 2),
  (F3, T3, s3, 3),
  (F4, T4, s4, 4),
  (F5, T5, s5, 5)
);
impl_join_inputs!(
  (F0, T0, s0, 0),
  (F1, T1, s1, 1),
  (F2, T2, s2, 2),
  (F3, T3, s3, 3),
  (F4, T4, s4, 4),
  (F5, T5, s5, 5),
  (F6, T6, s6, 6)
);
impl_join_inputs!(
  (F0, T0, s0, 0),
  (F1, T1, s1, 1),
  (F2, T2, s2, 2),
  (F3, T3, s3, 3),
  (F4, T4, s4, 4),
  (F5, T5, s5, 5),
  (F6, T6, s6, 6),
  (F7, T7, s7, 7)
);
