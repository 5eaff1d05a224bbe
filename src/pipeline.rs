//! # Pipeline Chainer
//!
//! Composes a sequence of stages into one asynchronous operation, feeding
//! each stage's resolved output to the next and short-circuiting on the
//! first failure.
//!
//! A [`Pipeline`] is constructed once and invoked any number of times;
//! invocations are independent and share no state. Stage `k + 1` never
//! starts until stage `k` has settled successfully; any failure skips the
//! remaining stages and surfaces wrapped with the failing stage's 0-based
//! index. No stage is retried and no timeout is imposed.
//!
//! The chainer threads whatever single value each stage produces. A stage
//! that fans out with [`join`](crate::join::join) passes a tuple along; the
//! next stage accepts the tuple directly or goes through
//! [`spread`](crate::spread::spread) to consume only the positions it
//! needs. Routing values through tuples this way replaces the usual
//! capture-an-outer-variable pattern with pure positional data flow.
//!
//! ```rust
//! use taskweave::{join, spread, value, Pipeline, TaskError};
//!
//! async fn double(n: i32) -> Result<i32, TaskError> {
//!   Ok(n * 2)
//! }
//!
//! # futures::executor::block_on(async {
//! let pipeline = Pipeline::new()
//!   .stage(|n: i32| join((value(n), double(n))))
//!   .stage(spread(|n: i32, doubled: i32| async move {
//!     Ok::<_, TaskError>(n + doubled)
//!   }));
//!
//! assert_eq!(pipeline.run(5).await?, 15);
//! # Ok::<(), TaskError>(())
//! # }).unwrap();
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use tracing::{debug, trace};

use crate::error::TaskError;

/// A value of type `T` available now or in the future, settling exactly
/// once to either `T` or a [`TaskError`]. Never retried or re-resolved.
pub type AsyncValue<T> = BoxFuture<'static, Result<T, TaskError>>;

/// A single step in a pipeline: a function from an input value to an
/// [`AsyncValue`] of an output value.
///
/// Blanket-implemented for closures and `async fn`s returning
/// `Result<Out, TaskError>`, so most stages are written as plain functions.
/// A stage must be referentially transparent with respect to its input:
/// for a fixed input it enqueues the same logical operation, with effects
/// flowing through its return value rather than captured outer state.
pub trait Stage<In>: Send + Sync {
  /// The value this stage resolves to.
  type Output;

  /// Begins the stage's operation for `input`.
  fn run(&self, input: In) -> AsyncValue<Self::Output>;
}

impl<In, F, Fut, Out> Stage<In> for F
where
  F: Fn(In) -> Fut + Send + Sync,
  Fut: Future<Output = Result<Out, TaskError>> + Send + 'static,
{
  type Output = Out;

  fn run(&self, input: In) -> AsyncValue<Out> {
    Box::pin((self)(input))
  }
}

type Chain<In, Out> = Arc<dyn Fn(In) -> AsyncValue<Out> + Send + Sync>;

/// An ordered sequence of stages composed into one asynchronous operation.
///
/// Built by chaining [`Pipeline::stage`]; each call appends a stage
/// consuming the previous stage's output type. Cloning is cheap and clones
/// share nothing at run time.
pub struct Pipeline<In, Out> {
  chain: Chain<In, Out>,
  stages: usize,
}

impl<In, Out> Clone for Pipeline<In, Out> {
  fn clone(&self) -> Self {
    Pipeline {
      chain: Arc::clone(&self.chain),
      stages: self.stages,
    }
  }
}

impl<In> Pipeline<In, In>
where
  In: Send + 'static,
{
  /// The empty pipeline: resolves to its input unchanged.
  pub fn new() -> Self {
    Pipeline {
      chain: Arc::new(|input| -> AsyncValue<In> { Box::pin(future::ready(Ok(input))) }),
      stages: 0,
    }
  }
}

impl<In> Default for Pipeline<In, In>
where
  In: Send + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<In, Out> Pipeline<In, Out>
where
  In: Send + 'static,
  Out: Send + 'static,
{
  /// Appends a stage consuming this pipeline's current output type.
  ///
  /// The stage runs only after every preceding stage has settled
  /// successfully; its failure is wrapped with the stage's 0-based index
  /// and skips everything after it.
  pub fn stage<S>(self, stage: S) -> Pipeline<In, S::Output>
  where
    S: Stage<Out> + 'static,
    S::Output: Send + 'static,
  {
    let chain = self.chain;
    let index = self.stages;
    let stage = Arc::new(stage);
    Pipeline {
      chain: Arc::new(move |input| -> AsyncValue<S::Output> {
        let chain = Arc::clone(&chain);
        let stage = Arc::clone(&stage);
        Box::pin(async move {
          let resolved = chain(input).await?;
          trace!(stage = index, "stage starting");
          match stage.run(resolved).await {
            Ok(output) => Ok(output),
            Err(source) => {
              debug!(stage = index, error = %source, "stage failed, halting pipeline");
              Err(TaskError::stage(index, source))
            }
          }
        })
      }),
      stages: index + 1,
    }
  }

  /// Runs the composed operation for `input`.
  ///
  /// Each invocation is independent of every other; running the same
  /// pipeline twice with the same input and pure stages yields identical
  /// outputs.
  pub fn run(&self, input: In) -> AsyncValue<Out> {
    (self.chain)(input)
  }

  /// Number of stages composed into this pipeline.
  pub fn stages(&self) -> usize {
    self.stages
  }
}
