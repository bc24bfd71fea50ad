// storefront/core/tests/pipeline_execution_tests.rs
mod common;

use common::setup_tracing;
use serial_test::serial;
use storefront_core::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineResult};

#[derive(Debug, Default)]
struct Trail {
  steps: Vec<String>,
  stop_at: Option<&'static str>,
}

#[derive(Debug, thiserror::Error)]
enum TrailError {
  #[error(transparent)]
  Pipeline(#[from] PipelineError),
  #[error("step {0} failed")]
  Step(String),
}

fn record(step: &'static str) -> impl Fn(ContextData<Trail>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<PipelineControl, TrailError>> + Send>> + Send + Sync + 'static {
  move |ctx: ContextData<Trail>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.steps.push(step.to_string());
      if guard.stop_at == Some(step) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  }
}

#[tokio::test]
#[serial]
async fn steps_run_in_declaration_order() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trail, TrailError>::new("ordered", &[("a", false), ("b", false), ("c", false)]);
  pipeline.on_root("c", record("c")).unwrap();
  pipeline.on_root("a", record("a")).unwrap();
  pipeline.on_root("b", record("b")).unwrap();

  let ctx = ContextData::new(Trail::default());
  let result = pipeline.run(ctx.clone()).await.unwrap();

  assert_eq!(result, PipelineResult::Completed);
  assert_eq!(ctx.read().steps, vec!["a", "b", "c"]);
}

#[tokio::test]
#[serial]
async fn stop_halts_remaining_steps() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trail, TrailError>::new("stopping", &[("a", false), ("b", false), ("c", false)]);
  for step in ["a", "b", "c"] {
    pipeline.on_root(step, record(step)).unwrap();
  }

  let ctx = ContextData::new(Trail {
    stop_at: Some("b"),
    ..Trail::default()
  });
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Stopped);
  assert_eq!(ctx.read().steps, vec!["a", "b"]);
}

#[tokio::test]
#[serial]
async fn first_error_aborts_the_run() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trail, TrailError>::new("failing", &[("a", false), ("b", false), ("c", false)]);
  pipeline.on_root("a", record("a")).unwrap();
  pipeline
    .on_root("b", |_ctx: ContextData<Trail>| async move {
      Err::<PipelineControl, _>(TrailError::Step("b".to_string()))
    })
    .unwrap();
  pipeline.on_root("c", record("c")).unwrap();

  let ctx = ContextData::new(Trail::default());
  let err = pipeline.run(ctx.clone()).await.unwrap_err();
  assert!(matches!(err, TrailError::Step(ref s) if s == "b"));
  assert_eq!(ctx.read().steps, vec!["a"]);
}

#[tokio::test]
#[serial]
async fn optional_steps_without_handlers_are_skipped() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trail, TrailError>::new("optional", &[("a", false), ("hook", true), ("c", false)]);
  pipeline.on_root("a", record("a")).unwrap();
  pipeline.on_root("c", record("c")).unwrap();

  let ctx = ContextData::new(Trail::default());
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert_eq!(ctx.read().steps, vec!["a", "c"]);
}

#[tokio::test]
#[serial]
async fn missing_handler_for_required_step_fails() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trail, TrailError>::new("incomplete", &[("a", false), ("b", false)]);
  pipeline.on_root("a", record("a")).unwrap();

  let err = pipeline.run(ContextData::new(Trail::default())).await.unwrap_err();
  assert!(matches!(
    err,
    TrailError::Pipeline(PipelineError::HandlerMissing { ref step_name }) if step_name == "b"
  ));
}

#[test]
fn registering_on_unknown_step_is_rejected() {
  let mut pipeline = Pipeline::<Trail, TrailError>::new("strict", &[("a", false)]);
  assert!(matches!(
    pipeline.on_root("zzz", record("zzz")),
    Err(PipelineError::StepNotFound { .. })
  ));
}
