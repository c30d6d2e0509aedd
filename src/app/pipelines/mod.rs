pub mod support_pipeline;

pub use support_pipeline::SupportPipeline;
