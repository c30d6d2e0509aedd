pub mod date;
pub mod etl;
pub mod ranking;
pub mod selector;
pub mod support;

pub use crate::domain::model::{Catalog, ProductEntry, SupportResult, VersionEntry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
