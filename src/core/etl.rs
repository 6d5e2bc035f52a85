use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform and load; returns the path of the written CSV.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting export");

        tracing::info!("Extracting movie records...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} unique records", records.len());

        tracing::info!("Building CSV...");
        let export = self.pipeline.transform(records).await?;
        tracing::info!("CSV ready ({} bytes)", export.bytes.len());

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(export).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
