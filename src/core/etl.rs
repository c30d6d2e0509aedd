use crate::core::Pipeline;
use crate::utils::error::Result;
use std::io::Write;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline with the report going to stdout.
    pub fn run(&self) -> Result<usize> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    pub fn run_to(&self, out: &mut dyn Write) -> Result<usize> {
        tracing::info!("Starting support window ranking");

        tracing::info!("Extracting catalog...");
        let catalog = self.pipeline.extract()?;
        tracing::info!("Extracted {} products", catalog.len());

        tracing::info!("Selecting best cycles...");
        let results = self.pipeline.transform(catalog)?;
        tracing::info!("Computed {} operating system results", results.len());

        tracing::info!("Ranking and reporting...");
        let reported = self.pipeline.load(results, out)?;
        out.flush()?;
        tracing::info!("Reported {} results", reported);

        Ok(reported)
    }
}
