use thiserror::Error;

/// Everything that can go wrong during one evaluation attempt.
///
/// None of these are fatal: the REPL reports them on the status line and
/// waits for the next expression.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("empty input")]
    EmptyInput,

    #[error("key-storage endpoint returned HTTP {status}")]
    CredentialTransport { status: u16 },

    #[error("key-storage endpoint unreachable: {0}")]
    CredentialUnreachable(#[source] reqwest::Error),

    #[error("key-storage response has no '{field}' value: {reason}")]
    CredentialSchema { field: &'static str, reason: String },

    #[error("no credential available")]
    CredentialUnavailable,

    /// `body` is kept for the log; it is not part of the message.
    #[error("completion endpoint returned HTTP {status}")]
    CompletionTransport { status: u16, body: String },

    #[error("completion endpoint unreachable: {0}")]
    CompletionUnreachable(#[source] reqwest::Error),

    #[error("unexpected completion response: {0}")]
    CompletionSchema(String),

    #[error("model output is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("model output must contain 'resultado' and a string 'latex'")]
    ResultSchema,
}

impl EvalError {
    /// True when the completion endpoint rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, EvalError::CompletionTransport { status: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
