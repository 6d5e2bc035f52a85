use thiserror::Error;

/// Batch-level outcome of an extraction run that produced nothing usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("No valid movies were found in the uploaded files.")]
    Empty,

    #[error("Failed to process the JSON files: {message}")]
    ProcessingError { message: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Extraction failed: {0}")]
    ExtractionError(#[from] ExtractionFailure),

    #[error("Extraction service error: {message}")]
    ExternalServiceError { message: String },

    #[error("Malformed input in '{file}'")]
    MalformedInput { file: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::ApiError(_) | ExportError::ExternalServiceError { .. } => {
                ErrorCategory::Network
            }
            ExportError::IoError(_) => ErrorCategory::Io,
            ExportError::SerializationError(_)
            | ExportError::ExtractionError(_)
            | ExportError::MalformedInput { .. }
            | ExportError::ValidationError { .. } => ErrorCategory::Data,
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExportError::MalformedInput { .. } => ErrorSeverity::Low,
            ExportError::ApiError(_) | ExportError::ExternalServiceError { .. } => {
                ErrorSeverity::Medium
            }
            ExportError::ExtractionError(ExtractionFailure::Empty)
            | ExportError::SerializationError(_)
            | ExportError::ValidationError { .. }
            | ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorSeverity::High,
            ExportError::ExtractionError(ExtractionFailure::ProcessingError { .. })
            | ExportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Terse message suitable for the end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::ExtractionError(ExtractionFailure::Empty) => {
                "No valid movies were found in the uploaded files.".to_string()
            }
            ExportError::ExtractionError(ExtractionFailure::ProcessingError { .. }) => {
                "Failed to process the JSON files.".to_string()
            }
            ExportError::ApiError(_) | ExportError::ExternalServiceError { .. } => {
                "The extraction service could not be reached.".to_string()
            }
            ExportError::IoError(e) => format!("A file could not be read or written: {}", e),
            ExportError::MalformedInput { file } => {
                format!("'{}' does not contain readable movie data.", file)
            }
            ExportError::SerializationError(_) => "The data could not be encoded.".to_string(),
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. }
            | ExportError::ValidationError { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExportError::ExtractionError(ExtractionFailure::Empty) => {
                "Check that the files are the JSON exports produced by the collection script."
            }
            ExportError::ExtractionError(ExtractionFailure::ProcessingError { .. }) => {
                "Re-run the export with the same files."
            }
            ExportError::ApiError(_) | ExportError::ExternalServiceError { .. } => {
                "Verify the API key and network connection, then run again."
            }
            ExportError::IoError(_) => "Check that the paths exist and are accessible.",
            ExportError::MalformedInput { .. } => "Make sure the file contains JSON text.",
            ExportError::SerializationError(_) => "Report the input that triggered this error.",
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. }
            | ExportError::ValidationError { .. } => {
                "Fix the configuration value and run again."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
