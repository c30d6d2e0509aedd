pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::pipelines::SupportPipeline;
pub use config::Settings;
pub use core::etl::EtlEngine;
pub use domain::model::SupportResult;
pub use utils::error::{EtlError, Result};

/// Prints the `top_n` operating systems with the longest support window
/// from the catalog at `file_path`, one `"<name> <cycle> <days>"` line each.
pub fn solution(file_path: &str, top_n: usize) -> Result<()> {
    let pipeline = SupportPipeline::new(LocalStorage::default(), Settings::new(file_path, top_n));
    EtlEngine::new(pipeline).run()?;
    Ok(())
}
