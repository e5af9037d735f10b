//! Pipelines.
//!
//! Pipelines are implemented here, and the module
//! provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
pub mod annotate;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod preprocess;

pub use annotate::{AnnotatePipeline, RunReport};
pub use pipeline::Pipeline;
pub use preprocess::Preprocess;
