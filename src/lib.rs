pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod html;
pub mod parsing;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpFetcher;
pub use config::{cli::LocalStorage, settings::ScraperSettings, ScraperConfig};
pub use core::{
    etl::{EtlEngine, RunReport},
    pipeline::SimplePipeline,
};
pub use utils::error::{Result, ScrapeError};
