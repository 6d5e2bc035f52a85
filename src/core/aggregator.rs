use crate::core::ai_fallback::AiFallbackExtractor;
use crate::core::structural::extract_structural;
use crate::domain::model::{MovieRecord, SourceFile};
use crate::domain::ports::{ExtractionService, Storage};
use crate::utils::error::{ExportError, ExtractionFailure};
use std::collections::HashMap;

/// Runs extraction over a batch of files and merges the results.
///
/// Files are handled strictly in order, one at a time. The merge relies on
/// that order: on a title collision the record seen last wins.
pub struct Aggregator<X: ExtractionService> {
    fallback: AiFallbackExtractor<X>,
}

impl<X: ExtractionService> Aggregator<X> {
    pub fn new(service: X) -> Self {
        Self {
            fallback: AiFallbackExtractor::new(service),
        }
    }

    /// Structural extraction first; the AI fallback only when that finds nothing.
    pub async fn extract_file(&self, file: &SourceFile) -> Vec<MovieRecord> {
        let structural = extract_structural(&file.content);
        if !structural.is_empty() {
            tracing::debug!(
                "'{}': {} records via structural extraction",
                file.name,
                structural.len()
            );
            return structural;
        }

        tracing::info!("'{}': no structural match, trying AI extraction", file.name);
        let extracted = self.fallback.extract(&file.content).await;
        if extracted.is_empty() {
            tracing::warn!(
                "{}; it contributes no records",
                ExportError::MalformedInput {
                    file: file.name.clone()
                }
            );
        } else {
            tracing::debug!(
                "'{}': {} records via AI extraction",
                file.name,
                extracted.len()
            );
        }
        extracted
    }

    pub async fn process_files(
        &self,
        files: &[SourceFile],
    ) -> std::result::Result<Vec<MovieRecord>, ExtractionFailure> {
        if files.is_empty() {
            tracing::warn!("No input files were supplied");
            return Err(ExtractionFailure::Empty);
        }

        let mut all_records = Vec::new();
        for file in files {
            all_records.extend(self.extract_file(file).await);
        }

        let extracted = all_records.len();
        let unique = dedupe_by_title(all_records);
        tracing::info!(
            "Extracted {} records from {} files ({} after deduplication)",
            extracted,
            files.len(),
            unique.len()
        );

        if unique.is_empty() {
            return Err(ExtractionFailure::Empty);
        }
        Ok(unique)
    }

    /// Reads each path through `storage` and processes the batch.
    ///
    /// Content is decoded as UTF-8 with replacement characters for invalid
    /// sequences. A file that cannot be read at all fails the whole batch.
    pub async fn process_paths<S: Storage>(
        &self,
        storage: &S,
        paths: &[String],
    ) -> std::result::Result<Vec<MovieRecord>, ExtractionFailure> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = storage.read_file(path).await.map_err(|e| {
                tracing::error!("Failed to read '{}': {}", path, e);
                ExtractionFailure::ProcessingError {
                    message: format!("could not read '{}': {}", path, e),
                }
            })?;
            files.push(SourceFile::new(
                path.as_str(),
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }

        self.process_files(&files).await
    }
}

/// Deduplicates by normalized title.
///
/// A later record replaces an earlier one with the same key but keeps the
/// earlier one's position, so output order is order of first appearance.
// NOTE: last-write-wins can replace a richer record with a sparser one from a later file.
pub fn dedupe_by_title(records: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<MovieRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.normalized_title()) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(record.normalized_title(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}
