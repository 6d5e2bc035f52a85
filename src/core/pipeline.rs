use crate::core::aggregator::Aggregator;
use crate::core::review;
use crate::core::session::Session;
use crate::core::{ConfigProvider, CsvExport, MovieRecord, Pipeline, Storage};
use crate::domain::ports::ExtractionService;
use crate::utils::error::{ExportError, Result};

/// Reads the configured files, extracts and deduplicates, applies row
/// removals, and writes `cinema_export.csv` into the output directory.
pub struct ExportPipeline<S: Storage, C: ConfigProvider, X: ExtractionService> {
    input: S,
    output: S,
    config: C,
    aggregator: Aggregator<X>,
}

impl<S: Storage, C: ConfigProvider, X: ExtractionService> ExportPipeline<S, C, X> {
    pub fn new(input: S, output: S, config: C, service: X) -> Self {
        Self {
            input,
            output,
            config,
            aggregator: Aggregator::new(service),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, X: ExtractionService> Pipeline for ExportPipeline<S, C, X> {
    async fn extract(&self) -> Result<Vec<MovieRecord>> {
        let records = self
            .aggregator
            .process_paths(&self.input, self.config.input_files())
            .await?;
        Ok(records)
    }

    async fn transform(&self, records: Vec<MovieRecord>) -> Result<CsvExport> {
        let mut session = Session::from(records);

        if self.config.review() {
            println!("{}", review::render_table(session.records()));
        }

        // Highest position first so earlier removals don't shift later ones.
        let mut dropped = self.config.dropped_rows().to_vec();
        dropped.sort_unstable_by(|a, b| b.cmp(a));
        dropped.dedup();
        for index in dropped {
            if let Some(record) = session.remove_record(index) {
                tracing::info!("Removed row {}: {}", index, record.title);
            }
        }

        session.export_csv().ok_or_else(|| ExportError::ValidationError {
            message: "every extracted record was removed; nothing to export".to_string(),
        })
    }

    async fn load(&self, export: CsvExport) -> Result<String> {
        tracing::debug!(
            "Writing {} ({} bytes, {})",
            export.file_name,
            export.bytes.len(),
            export.mime_type
        );
        self.output
            .write_file(&export.file_name, &export.bytes)
            .await?;

        let output_path = std::path::Path::new(self.config.output_path())
            .join(&export.file_name)
            .display()
            .to_string();
        Ok(output_path)
    }
}
