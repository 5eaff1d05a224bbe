//! Tests for the pipeline chainer: sequential ordering, short-circuiting,
//! stage-index attribution, and cross-invocation purity.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use taskweave::{Pipeline, TaskError, join, spread, value};
use tokio_test::{assert_err, assert_ok};

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn double(n: i32) -> Result<i32, TaskError> {
  Ok(n * 2)
}

#[tokio::test]
async fn stages_run_in_sequence() {
  init_tracing();
  let pipeline = Pipeline::new()
    .stage(|n: i32| double(n))
    .stage(|n: i32| async move { Ok::<_, TaskError>(n + 1) });

  assert_eq!(pipeline.stages(), 2);
  assert_eq!(assert_ok!(pipeline.run(5).await), 11);
}

#[tokio::test]
async fn empty_pipeline_is_the_identity() {
  let pipeline = Pipeline::<i32, i32>::new();
  assert_eq!(pipeline.stages(), 0);
  assert_eq!(assert_ok!(pipeline.run(42).await), 42);
}

#[tokio::test]
async fn failing_stage_skips_its_successors() {
  let reached = Arc::new(AtomicBool::new(false));
  let observed = Arc::clone(&reached);

  let pipeline = Pipeline::new()
    .stage(|_n: i32| async move { Err::<i32, _>(TaskError::message("boom")) })
    .stage(move |n: i32| {
      let observed = Arc::clone(&observed);
      async move {
        observed.store(true, Ordering::SeqCst);
        Ok::<_, TaskError>(n)
      }
    });

  let error = assert_err!(pipeline.run(5).await);
  assert_eq!(error.stage_index(), Some(0));
  assert_eq!(error.root_cause().to_string(), "operation failed: boom");
  assert!(!reached.load(Ordering::SeqCst));
}

#[tokio::test]
async fn failure_identifies_the_halting_stage() {
  let pipeline = Pipeline::new()
    .stage(|n: i32| double(n))
    .stage(|_n: i32| async move { Err::<i32, _>(TaskError::message("middle")) })
    .stage(|n: i32| double(n));

  let error = assert_err!(pipeline.run(1).await);
  assert_eq!(error.stage_index(), Some(1));
  assert_eq!(error.to_string(), "pipeline stage 1 failed");
}

#[tokio::test]
async fn later_stages_start_only_after_earlier_ones_settle() {
  let sequence = Arc::new(AtomicUsize::new(0));

  let first = Arc::clone(&sequence);
  let second = Arc::clone(&sequence);
  let pipeline = Pipeline::new()
    .stage(move |n: i32| {
      let sequence = Arc::clone(&first);
      async move {
        tokio::task::yield_now().await;
        // Strict sequential ordering: nothing downstream has run yet.
        assert_eq!(sequence.fetch_add(1, Ordering::SeqCst), 0);
        Ok::<_, TaskError>(n)
      }
    })
    .stage(move |n: i32| {
      let sequence = Arc::clone(&second);
      async move {
        assert_eq!(sequence.fetch_add(1, Ordering::SeqCst), 1);
        Ok::<_, TaskError>(n)
      }
    });

  assert_ok!(pipeline.run(0).await);
  assert_eq!(sequence.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fan_out_preserves_the_original_input_for_later_stages() {
  init_tracing();
  // A stage fans out concurrently; the next consumes both positions.
  let pipeline = Pipeline::new()
    .stage(|n: i32| join((value(n), double(n))))
    .stage(spread(|n: i32, doubled: i32| async move {
      Ok::<_, TaskError>((n, doubled))
    }));

  assert_eq!(assert_ok!(pipeline.run(5).await), (5, 10));
}

#[tokio::test]
async fn side_channel_results_can_be_dropped_downstream() {
  async fn store(record: String) -> Result<u64, TaskError> {
    Ok(record.len() as u64)
  }

  let pipeline = Pipeline::new()
    .stage(|record: String| join((value(record.clone()), store(record))))
    // The storage acknowledgment at position 1 is never read.
    .stage(spread(|record: String| async move {
      Ok::<_, TaskError>(record.to_uppercase())
    }));

  assert_eq!(
    assert_ok!(pipeline.run("report".to_string()).await),
    "REPORT"
  );
}

#[tokio::test]
async fn join_failures_carry_both_stage_and_input_indices() {
  let pipeline = Pipeline::new().stage(|n: i32| {
    join((value(n), async move {
      Err::<i32, _>(TaskError::message("fetch failed"))
    }))
  });

  let error = assert_err!(pipeline.run(1).await);
  assert_eq!(error.stage_index(), Some(0));
  match error {
    TaskError::Stage { source, .. } => assert_eq!(source.join_index(), Some(1)),
    other => panic!("expected a stage failure, got {other}"),
  }
}

#[tokio::test]
async fn repeated_runs_share_no_state() {
  let pipeline = Pipeline::new()
    .stage(|n: i32| join((value(n), double(n))))
    .stage(spread(|n: i32, doubled: i32| async move {
      Ok::<_, TaskError>(vec![n, doubled])
    }));

  let first = assert_ok!(pipeline.run(5).await);
  let second = assert_ok!(pipeline.run(5).await);
  assert_eq!(first, vec![5, 10]);
  assert_eq!(first, second);
}

#[tokio::test]
async fn clones_run_independently() {
  let pipeline = Pipeline::new().stage(|n: i32| double(n));
  let clone = pipeline.clone();

  assert_eq!(assert_ok!(pipeline.run(2).await), 4);
  assert_eq!(assert_ok!(clone.run(3).await), 6);
}

#[tokio::test]
async fn stage_types_can_change_along_the_chain() {
  let pipeline = Pipeline::new()
    .stage(|n: u32| async move { Ok::<_, TaskError>(format!("record-{n}")) })
    .stage(|record: String| async move { Ok::<_, TaskError>(record.len()) });

  assert_eq!(assert_ok!(pipeline.run(17).await), "record-17".len());
}
