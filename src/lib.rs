pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::gemini::{DisabledExtractionService, GeminiClient};
pub use adapters::storage::LocalStorage;
pub use config::ExportConfig;
pub use crate::core::{
    aggregator::Aggregator, ai_fallback::AiFallbackExtractor, csv_export::to_csv,
    etl::ExportEngine, pipeline::ExportPipeline, session::Session,
    structural::extract_structural,
};
pub use domain::model::{ListType, MovieRecord, Rating, SourceFile};
pub use utils::error::{ExportError, ExtractionFailure, Result};
