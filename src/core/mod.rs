pub mod aggregator;
pub mod ai_fallback;
pub mod csv_export;
pub mod etl;
pub mod pipeline;
pub mod review;
pub mod session;
pub mod structural;

pub use crate::domain::model::{CsvExport, MovieRecord, SourceFile};
pub use crate::domain::ports::{ConfigProvider, ExtractionService, Pipeline, Storage};
pub use crate::utils::error::Result;
