use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoughError {
    #[error("Input '{field}' out of range: {value} ({reason})")]
    OutOfRangeInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Inconsistent flour split: bread flour {bread_flour_pct}% + whole wheat {whole_wheat_pct}% must equal 100%"
    )]
    InconsistentFlourSplit {
        bread_flour_pct: f64,
        whole_wheat_pct: f64,
    },

    #[error("Derived mass for {ingredient} is negative: {grams:.1}g")]
    NegativeDerivedMass { ingredient: String, grams: f64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定 CLI 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DoughError {
    pub fn out_of_range(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        DoughError::OutOfRangeInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DoughError::OutOfRangeInput { .. }
            | DoughError::InconsistentFlourSplit { .. }
            | DoughError::NegativeDerivedMass { .. } => ErrorCategory::Input,
            DoughError::ConfigError { .. }
            | DoughError::ConfigValidationError { .. }
            | DoughError::InvalidConfigValueError { .. }
            | DoughError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DoughError::IoError(_)
            | DoughError::SerializationError(_)
            | DoughError::CsvError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                // 磁碟寫入失敗可以換個路徑重試
                DoughError::IoError(_) => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DoughError::OutOfRangeInput { field, value, reason } => {
                format!("The value {} for {} is not allowed: {}", value, field, reason)
            }
            DoughError::InconsistentFlourSplit {
                bread_flour_pct,
                whole_wheat_pct,
            } => format!(
                "Bread flour ({}%) and whole wheat ({}%) must add up to 100%",
                bread_flour_pct, whole_wheat_pct
            ),
            DoughError::NegativeDerivedMass { ingredient, grams } => format!(
                "This recipe is not feasible: the final dough would need {:.1}g of {}",
                grams, ingredient
            ),
            DoughError::MissingConfigError { field } => {
                format!("The recipe file is missing '{}'", field)
            }
            DoughError::ConfigError { .. }
            | DoughError::ConfigValidationError { .. }
            | DoughError::InvalidConfigValueError { .. } => {
                format!("The recipe configuration is invalid: {}", self)
            }
            DoughError::IoError(e) => format!("Could not read or write a file: {}", e),
            DoughError::SerializationError(_) | DoughError::CsvError(_) => {
                format!("Could not render the recipe: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DoughError::OutOfRangeInput { field, .. } => {
                format!("Pick a value for {} inside the allowed range", field)
            }
            DoughError::InconsistentFlourSplit { .. } => {
                "Set only one of bread flour / whole wheat, the other share is derived".to_string()
            }
            DoughError::NegativeDerivedMass { .. } => {
                "Lower the poolish percentage or use the proportional poolish policy".to_string()
            }
            DoughError::MissingConfigError { .. }
            | DoughError::ConfigError { .. }
            | DoughError::ConfigValidationError { .. }
            | DoughError::InvalidConfigValueError { .. } => {
                "Check the recipe file against the documented [dough]/[recipe]/[output]/[limits] tables"
                    .to_string()
            }
            DoughError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            DoughError::SerializationError(_) | DoughError::CsvError(_) => {
                "Try the text output format".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DoughError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = DoughError::out_of_range("hydration", 95.0, "Value must be between 50 and 80");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("hydration"));
    }

    #[test]
    fn test_negative_mass_message() {
        let err = DoughError::NegativeDerivedMass {
            ingredient: "final bread flour".to_string(),
            grams: -12.345,
        };
        assert_eq!(err.to_string(), "Derived mass for final bread flour is negative: -12.3g");
        assert!(err.recovery_suggestion().contains("proportional"));
    }

    #[test]
    fn test_io_error_is_retryable() {
        let err = DoughError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
