// storefront/core/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct and its construction methods.

use crate::error::PipelineError;
use crate::pipeline::context_data::ContextData;
use crate::pipeline::control::PipelineControl;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A step handler: takes a clone of the shared context and resolves to a
/// control signal or the pipeline's error type.
///
/// Handlers must drop any `read()`/`write()` guard before awaiting.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// A named step. Optional steps without handlers are skipped at run time;
/// non-optional ones fail the run with [`PipelineError::HandlerMissing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}

/// An ordered list of steps over root data `TData`, whose handlers fail with `Err`.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(step_name, optional)` pairs.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      name: name.into(),
      steps,
      on: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn steps(&self) -> &[StepDef] {
    &self.steps
  }

  /// Registers a handler for `step_name`. Handlers of one step run in
  /// registration order.
  ///
  /// The handler's own error type only needs to convert into the pipeline's `Err`.
  pub fn on_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Result<&mut Self, PipelineError>
  where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    if !self.steps.iter().any(|s| s.name == step_name) {
      return Err(PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      });
    }

    let handler: Handler<TData, Err> = Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.on.entry(step_name.to_string()).or_default().push(handler);
    Ok(self)
  }
}
