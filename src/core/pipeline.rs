use crate::core::aggregate::aggregate;
use crate::core::writer::write_rows;
use crate::core::{ConfigProvider, MunicipalityResult, PageSource, Pipeline, ScrapeResult, Storage};
use crate::parsing::{detail, listing};
use crate::utils::error::{Result, ScrapeError};
use url::Url;

/// Listing page, then every municipality page in listing order, one request at a time.
pub struct SimplePipeline<F: PageSource, S: Storage, C: ConfigProvider> {
    source: F,
    storage: S,
    config: C,
}

impl<F: PageSource, S: Storage, C: ConfigProvider> SimplePipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    fn listing_url(&self) -> Result<Url> {
        Url::parse(self.config.listing_url()).map_err(|e| ScrapeError::Usage {
            field: "listing_url".to_string(),
            value: self.config.listing_url().to_string(),
            reason: format!("Invalid URL format: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<F: PageSource, S: Storage, C: ConfigProvider> Pipeline for SimplePipeline<F, S, C> {
    async fn extract(&self) -> Result<Vec<MunicipalityResult>> {
        let listing_url = self.listing_url()?;

        tracing::debug!("Fetching municipality listing: {}", listing_url);
        let body = self.source.fetch_page(&listing_url).await?;
        let municipalities = listing::parse_listing(&body, &listing_url, self.config.link_policy())?;
        tracing::info!("Found {} municipalities", municipalities.len());

        let total = municipalities.len();
        let mut results = Vec::with_capacity(total);
        for (index, municipality) in municipalities.into_iter().enumerate() {
            tracing::debug!(
                "[{}/{}] {} {}: {}",
                index + 1,
                total,
                municipality.code,
                municipality.name,
                municipality.detail_url
            );

            let body = self.source.fetch_page(&municipality.detail_url).await?;
            let (summary, parties) = detail::parse_detail(&body, self.config.party_strategy());
            if parties.is_empty() {
                tracing::warn!(
                    "No party results found for {} ({})",
                    municipality.name,
                    municipality.code
                );
            }

            results.push(MunicipalityResult {
                municipality,
                summary,
                parties,
            });
        }

        Ok(results)
    }

    async fn transform(&self, data: Vec<MunicipalityResult>) -> Result<ScrapeResult> {
        let result = aggregate(&data, self.config.column_policy());
        tracing::debug!(
            "Header has {} columns ({:?} policy)",
            result.header.len(),
            self.config.column_policy()
        );
        Ok(result)
    }

    async fn load(&self, result: ScrapeResult) -> Result<String> {
        let output_path = self.config.output_path();
        let data = write_rows(&result.header, &result.rows, self.config.delimiter())?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ColumnPolicy, LinkPolicy, PartyStrategy};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    /// Serves canned pages; unknown URLs fail like a refused connection would.
    struct MockSource {
        pages: HashMap<String, String>,
    }

    impl PageSource for MockSource {
        async fn fetch_page(&self, url: &Url) -> Result<String> {
            self.pages.get(url.as_str()).cloned().ok_or_else(|| {
                ScrapeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no page for {}", url),
                ))
            })
        }
    }

    struct MockConfig {
        listing_url: String,
        column_policy: ColumnPolicy,
    }

    impl ConfigProvider for MockConfig {
        fn listing_url(&self) -> &str {
            &self.listing_url
        }

        fn output_path(&self) -> &str {
            "results.csv"
        }

        fn delimiter(&self) -> u8 {
            b';'
        }

        fn column_policy(&self) -> ColumnPolicy {
            self.column_policy
        }

        fn link_policy(&self) -> LinkPolicy {
            LinkPolicy::Rich
        }

        fn party_strategy(&self) -> PartyStrategy {
            PartyStrategy::Auto
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(20)
        }

        fn user_agent(&self) -> &str {
            "test"
        }
    }

    const LISTING_URL: &str = "https://volby.test/ps32?xnumnuts=2101";

    fn pages() -> HashMap<String, String> {
        let listing = r#"<table>
            <tr><td><a href="ps311?xobec=1">1</a></td><td>A-town</td></tr>
            <tr><td><a href="ps311?xobec=2">2</a></td><td>B-town</td></tr>
        </table>"#;
        let first = r#"<table>
            <tr><td headers="sa2">10</td><td headers="sa3">8</td><td headers="sa6">7</td></tr>
            <tr><td headers="t1sb1">1</td><td headers="t1sb2">Party A</td><td headers="t1sb3">7</td></tr>
        </table>"#;
        let second = r#"<table>
            <tr><td headers="sa2">20</td><td headers="sa3">15</td><td headers="sa6">15</td></tr>
            <tr><td headers="t1sb1">1</td><td headers="t1sb2">Party A</td><td headers="t1sb3">5</td></tr>
            <tr><td headers="t1sb1">2</td><td headers="t1sb2">Party B</td><td headers="t1sb3">10</td></tr>
        </table>"#;

        HashMap::from([
            (LISTING_URL.to_string(), listing.to_string()),
            ("https://volby.test/ps311?xobec=1".to_string(), first.to_string()),
            ("https://volby.test/ps311?xobec=2".to_string(), second.to_string()),
        ])
    }

    fn pipeline(
        column_policy: ColumnPolicy,
        storage: MockStorage,
    ) -> SimplePipeline<MockSource, MockStorage, MockConfig> {
        SimplePipeline::new(
            MockSource { pages: pages() },
            storage,
            MockConfig {
                listing_url: LISTING_URL.to_string(),
                column_policy,
            },
        )
    }

    #[tokio::test]
    async fn test_extract_visits_municipalities_in_order() {
        let pipeline = pipeline(ColumnPolicy::Union, MockStorage::default());
        let results = pipeline.extract().await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].municipality.code, "1");
        assert_eq!(results[0].summary.registered, 10);
        assert_eq!(results[1].municipality.name, "B-town");
        assert_eq!(results[1].parties.len(), 2);
    }

    #[tokio::test]
    async fn test_full_run_writes_union_header() {
        let storage = MockStorage::default();
        let pipeline = pipeline(ColumnPolicy::Union, storage.clone());

        let results = pipeline.extract().await.unwrap();
        let scraped = pipeline.transform(results).await.unwrap();
        let path = pipeline.load(scraped).await.unwrap();

        assert_eq!(path, "results.csv");
        let written = String::from_utf8(storage.get_file("results.csv").await.unwrap()).unwrap();
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "code;location;registered;envelopes;valid;Party A;Party B",
                "1;A-town;10;8;7;7;0",
                "2;B-town;20;15;15;5;10",
            ]
        );
    }

    #[tokio::test]
    async fn test_first_row_policy_drops_later_parties() {
        let pipeline = pipeline(ColumnPolicy::FirstRow, MockStorage::default());

        let results = pipeline.extract().await.unwrap();
        let scraped = pipeline.transform(results).await.unwrap();

        assert_eq!(scraped.header.last().map(String::as_str), Some("Party A"));
        assert_eq!(scraped.header.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_detail_fetch_aborts_extract() {
        let mut source_pages = pages();
        source_pages.remove("https://volby.test/ps311?xobec=2");
        let pipeline = SimplePipeline::new(
            MockSource {
                pages: source_pages,
            },
            MockStorage::default(),
            MockConfig {
                listing_url: LISTING_URL.to_string(),
                column_policy: ColumnPolicy::Union,
            },
        );

        assert!(pipeline.extract().await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_listing_url_is_a_usage_error() {
        let pipeline = SimplePipeline::new(
            MockSource { pages: pages() },
            MockStorage::default(),
            MockConfig {
                listing_url: "not a url".to_string(),
                column_policy: ColumnPolicy::Union,
            },
        );

        let err = pipeline.extract().await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
