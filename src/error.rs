use thiserror::Error;

/// Failures surfaced by the forecast pipeline.
///
/// Every variant is recoverable: the shell clears any stale result and shows
/// the message. Nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// The commodity catalog could not be fetched or decoded.
    #[error("Failed to fetch commodities: {0}")]
    CatalogUnavailable(String),
    /// Client-side input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The prediction (or history) call failed or returned a malformed body.
    #[error("Failed to get prediction: {0}")]
    PredictionFailed(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        let exit_code = match err {
            ForecastError::Validation(_) => 2,
            ForecastError::CatalogUnavailable(_) | ForecastError::PredictionFailed(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
