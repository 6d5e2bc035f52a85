use crate::domain::model::{CsvExport, ExtractionRequest, MovieRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn ai_endpoint(&self) -> &str;
    fn ai_model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout_seconds(&self) -> Option<u64>;
    /// Row positions (as shown in the review table) to drop before export.
    fn dropped_rows(&self) -> &[usize];
    fn review(&self) -> bool;
}

/// Structured-extraction backend. Returns the JSON text produced for the request.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String>;
}

#[async_trait]
impl<T: ExtractionService + ?Sized> ExtractionService for Box<T> {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        (**self).extract(request).await
    }
}

#[async_trait]
impl<T: ExtractionService + ?Sized> ExtractionService for Arc<T> {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        (**self).extract(request).await
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MovieRecord>>;
    async fn transform(&self, records: Vec<MovieRecord>) -> Result<CsvExport>;
    async fn load(&self, export: CsvExport) -> Result<String>;
}
