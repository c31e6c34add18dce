use crate::domain::model::{
    ColumnPolicy, LinkPolicy, MunicipalityResult, PartyStrategy, ScrapeResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Returns the body of a page. Parsing happens on the caller's side.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, url: &Url) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn column_policy(&self) -> ColumnPolicy;
    fn link_policy(&self) -> LinkPolicy;
    fn party_strategy(&self) -> PartyStrategy;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MunicipalityResult>>;
    async fn transform(&self, data: Vec<MunicipalityResult>) -> Result<ScrapeResult>;
    async fn load(&self, result: ScrapeResult) -> Result<String>;
}
