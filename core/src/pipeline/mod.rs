// storefront/core/src/pipeline/mod.rs

//! A small asynchronous step pipeline: an ordered list of named steps, each
//! with handlers operating on a shared [`ContextData`].

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline, StepDef};
