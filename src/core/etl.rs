use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub municipalities: usize,
    pub output_path: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Nothing is written unless every page was fetched and parsed.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting scrape");

        tracing::info!("Extracting municipality results...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} municipalities", raw_data.len());

        tracing::info!("Building output rows...");
        let result = self.pipeline.transform(raw_data).await?;
        let municipalities = result.rows.len();
        tracing::info!(
            "Built {} rows with {} columns",
            municipalities,
            result.header.len()
        );

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunReport {
            municipalities,
            output_path,
        })
    }
}
