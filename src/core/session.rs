use crate::core::aggregator::Aggregator;
use crate::core::csv_export;
use crate::domain::model::{CsvExport, MovieRecord, SourceFile};
use crate::domain::ports::ExtractionService;
use crate::utils::error::ExtractionFailure;

/// State owned by the caller between extraction and export: the files
/// queued for the next batch and the current record list.
#[derive(Debug, Default)]
pub struct Session {
    files: Vec<SourceFile>,
    records: Vec<MovieRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: SourceFile) {
        tracing::debug!("Queued '{}' ({} bytes)", file.name, file.content.len());
        self.files.push(file);
    }

    pub fn remove_file(&mut self, index: usize) -> Option<SourceFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Runs a batch over the queued files.
    ///
    /// On success the record list is replaced and the file contents are
    /// released; on failure both are left as they were.
    pub async fn extract<X: ExtractionService>(
        &mut self,
        aggregator: &Aggregator<X>,
    ) -> Result<&[MovieRecord], ExtractionFailure> {
        let records = aggregator.process_files(&self.files).await?;
        self.records = records;
        self.files.clear();
        Ok(&self.records)
    }

    /// Removes the record at `index` (its position in the review table).
    pub fn remove_record(&mut self, index: usize) -> Option<MovieRecord> {
        if index >= self.records.len() {
            tracing::warn!(
                "Row {} does not exist ({} records)",
                index,
                self.records.len()
            );
            return None;
        }
        Some(self.records.remove(index))
    }

    pub fn reset(&mut self) {
        self.files.clear();
        self.records.clear();
    }

    pub fn export_csv(&self) -> Option<CsvExport> {
        csv_export::export(&self.records)
    }
}

impl From<Vec<MovieRecord>> for Session {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self {
            files: Vec::new(),
            records,
        }
    }
}
