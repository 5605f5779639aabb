use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourierError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input error on line {line}: {message}")]
    InputError { line: usize, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("{}", unschedulable_message(.package_ids, .max_carriable_weight))]
    UnschedulableError {
        package_ids: Vec<String>,
        max_carriable_weight: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Scheduling,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CourierError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CourierError::ConfigError { .. }
            | CourierError::ConfigValidationError { .. }
            | CourierError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CourierError::InputError { .. } | CourierError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            CourierError::UnschedulableError { .. } => ErrorCategory::Scheduling,
            CourierError::IoError(_)
            | CourierError::CsvError(_)
            | CourierError::SerializationError(_)
            | CourierError::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            // 部分結果仍可用 --allow-partial 取得
            ErrorCategory::Scheduling => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CourierError::InputError { line, .. } => format!(
                "Check line {} of the input; expected `base_cost package_count`, then `id weight distance [offer]` per package, then `vehicles max_speed max_carriable_weight`",
                line
            ),
            CourierError::ValidationError { .. } => {
                "Weights, distances, speed and capacity must be positive numbers and package ids must be unique".to_string()
            }
            CourierError::UnschedulableError { .. } => {
                "Increase the maximum carriable weight, split the heavy packages, or rerun with --allow-partial".to_string()
            }
            CourierError::ConfigError { .. }
            | CourierError::ConfigValidationError { .. }
            | CourierError::InvalidConfigValueError { .. } => {
                "Review the tariff TOML file and the command line flags".to_string()
            }
            CourierError::IoError(_) => {
                "Make sure the input file exists and the output location is writable".to_string()
            }
            CourierError::CsvError(_)
            | CourierError::SerializationError(_)
            | CourierError::ProcessingError { .. } => {
                "Try another output format or rerun with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid delivery batch: {}", self),
            ErrorCategory::Scheduling => format!("Scheduling incomplete: {}", self),
            ErrorCategory::System => format!("Unexpected failure: {}", self),
        }
    }
}

fn unschedulable_message(package_ids: &[String], max_carriable_weight: &f64) -> String {
    format!(
        "{} package(s) exceed the vehicle capacity of {} and were never scheduled: {}",
        package_ids.len(),
        max_carriable_weight,
        package_ids.join(", ")
    )
}

pub type Result<T> = std::result::Result<T, CourierError>;
