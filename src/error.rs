use thiserror::Error;

/// Problems with the hook payload on stdin. Any of these aborts the run with
/// exit code 1; everything else degrades to a default value.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("stdin is empty")]
    Empty,
    #[error("stdin exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read stdin: {0}")]
    Read(#[from] std::io::Error),
    #[error("JSON parsing: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required key: {0}")]
    MissingKey(&'static str),
    #[error("required key is not a string: {0}")]
    InvalidKey(&'static str),
}

