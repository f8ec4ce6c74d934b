use thiserror::Error;

/// Failure of a single prediction round-trip.
///
/// Connection failures, non-success statuses and undecodable bodies are not
/// told apart; the cause is kept as the error source for diagnostics only.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("network response was not ok")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint must use http or https, got {scheme:?}")]
    UnsupportedScheme { scheme: String },
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Joins an error and its sources into one line.
pub fn describe_error(error: &(dyn std::error::Error + 'static)) -> String {
    let mut pieces = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() {
            pieces.push(format!("caused by {text}"));
        }
        source = cause.source();
    }
    pieces.join(" | ")
}
