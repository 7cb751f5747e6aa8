use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed provider response: {reason}")]
    MalformedResponseError { reason: String },

    #[error("Webhook delivery failed with status {status}")]
    DeliveryError { status: u16 },
}

pub type Result<T> = std::result::Result<T, ReportError>;
