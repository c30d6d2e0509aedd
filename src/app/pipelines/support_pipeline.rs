use crate::core::ranking::{rank_products, render, top_n};
use crate::core::selector::select_best_cycle;
use crate::core::{Catalog, ConfigProvider, Pipeline, ProductEntry, Storage, SupportResult};
use crate::utils::error::Result;
use std::io::Write;

pub struct SupportPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> SupportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SupportPipeline<S, C> {
    fn extract(&self) -> Result<Catalog> {
        tracing::debug!("Loading catalog from: {}", self.config.catalog_path());
        let bytes = self.storage.read_file(self.config.catalog_path())?;
        Catalog::from_slice(&bytes)
    }

    fn transform(&self, catalog: Catalog) -> Result<Vec<SupportResult>> {
        let fields = self.config.fields();
        catalog
            .entries
            .iter()
            .filter(|(_, product)| ProductEntry::is_os(product))
            .map(|(id, product)| {
                let entry = ProductEntry::from_json(id, product)?;
                select_best_cycle(&entry, fields)
            })
            .collect()
    }

    fn load(&self, results: Vec<SupportResult>, out: &mut dyn Write) -> Result<usize> {
        let ranked = rank_products(results);
        let top = top_n(&ranked, self.config.top_n());
        let rendered = render(top, self.config.output_format())?;

        match self.config.output_path() {
            Some(path) => {
                tracing::debug!("Writing {} report to {}", self.config.output_format(), path);
                self.storage.write_file(path, rendered.as_bytes())?;
            }
            None => out.write_all(rendered.as_bytes())?,
        }

        Ok(top.len())
    }
}
