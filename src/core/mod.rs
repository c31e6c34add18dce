pub mod aggregate;
pub mod etl;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{MunicipalityResult, OutputRow, ScrapeResult};
pub use crate::domain::ports::{ConfigProvider, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
