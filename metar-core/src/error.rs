use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetarError {
    #[error("Request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Weather provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected response format: {0}")]
    MalformedResponse(String),

    #[error("Report not found for {0}. The airfield code may be invalid.")]
    NotFound(String),

    #[error("No valid ICAO code specified")]
    NoCodes,
}
