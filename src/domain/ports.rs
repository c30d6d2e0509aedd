use crate::domain::model::{Catalog, FieldNames, OutputFormat, SupportResult};
use crate::utils::error::Result;
use std::io::Write;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn catalog_path(&self) -> &str;
    fn top_n(&self) -> usize;
    fn fields(&self) -> &FieldNames;
    fn output_format(&self) -> OutputFormat;
    /// `None` sends the report to the engine's writer.
    fn output_path(&self) -> Option<&str>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Catalog>;
    fn transform(&self, catalog: Catalog) -> Result<Vec<SupportResult>>;
    /// Ranks, truncates and writes the report. Returns how many results
    /// were reported.
    fn load(&self, results: Vec<SupportResult>, out: &mut dyn Write) -> Result<usize>;
}
