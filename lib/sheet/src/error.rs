use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("bad A1 range: {0}")]
    Range(String),
}

impl SheetError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Quota exhaustion (429), server-side failures (5xx) and network
    /// errors are transient; everything else fails fast.
    pub fn is_transient(&self) -> bool {
        match self {
            SheetError::Api { status, .. } => *status == 429 || *status >= 500,
            SheetError::Network(_) => true,
            _ => false,
        }
    }
}
