//! # taskweave
//!
//! Minimal asynchronous-composition combinators: fan a pipeline stage out
//! into concurrent side-effecting operations while keeping the stage's
//! original input available to later stages, without mutable shared state
//! between stages.
//!
//! Three combinators carry the design:
//!
//! - **[`join()`]** — runs an ordered tuple of operations concurrently and
//!   produces one result tuple preserving positional order, whatever the
//!   completion order.
//! - **[`spread()`]** — wraps a fixed-arity function so it can consume a
//!   tuple's elements as positional arguments, ignoring extras.
//! - **[`Pipeline`]** — threads a value through a sequence of stages,
//!   short-circuiting on the first failure.
//!
//! Values a later stage needs are routed through a join into a tuple and
//! selected positionally with spread, instead of being captured from an
//! outer scope. The combinators run on the caller's executor, spawn
//! nothing, and impose no retries, timeouts, or cancellation; domain
//! operations are opaque caller-supplied futures.
//!
//! ## Quick Start
//!
//! ```rust
//! use taskweave::{join, spread, value, Pipeline, TaskError};
//!
//! async fn fetch(id: u32) -> Result<String, TaskError> {
//!   Ok(format!("record-{id}"))
//! }
//!
//! async fn store(record: String) -> Result<u64, TaskError> {
//!   Ok(record.len() as u64) // acknowledgment
//! }
//!
//! # futures::executor::block_on(async {
//! let pipeline = Pipeline::new()
//!   .stage(|id: u32| fetch(id))
//!   // Fan out: keep the record while the store runs concurrently.
//!   .stage(|record: String| join((value(record.clone()), store(record))))
//!   // The acknowledgment is never read; spread drops it.
//!   .stage(spread(|record: String| async move {
//!     Ok::<_, TaskError>(record.to_uppercase())
//!   }));
//!
//! assert_eq!(pipeline.run(7).await?, "RECORD-7");
//! # Ok::<(), TaskError>(())
//! # }).unwrap();
//! ```

#![deny(missing_docs)]

/// Error types shared by every combinator.
pub mod error;
/// Concurrent join preserving positional correspondence.
pub mod join;
/// Sequential stage composition with short-circuiting failure propagation.
pub mod pipeline;
/// Tuple-to-positional-arguments adapter.
pub mod spread;

pub use error::TaskError;
pub use join::{JoinInputs, fail, join, value};
pub use pipeline::{AsyncValue, Pipeline, Stage};
pub use spread::{FnArgs, SpreadInto, spread};
