use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("{op} returned status code {status}")]
    UnexpectedStatus { op: &'static str, status: u16 },

    #[error("{0} not specified")]
    MissingEnv(&'static str),

    #[error("benchmark output is not a json object")]
    NotAnObject,
}
