use reqwest::StatusCode;
use thiserror::Error;

/// Why a single asset could not be refreshed. Never fatal: the refresh loop
/// logs it and moves on to the next asset.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}
