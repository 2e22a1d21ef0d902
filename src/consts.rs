//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Key-storage endpoint that hands out the completion API key.
pub const DEFAULT_KEY_URL: &str = "https://690a3da01a446bb9cc21eb68.mockapi.io/apiKeyOpenAI";

/// OpenAI Responses API endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/responses";

/// Default model when none is specified.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Field carrying the token in key-storage records.
pub const API_KEY_FIELD: &str = "apiKey";

/// Math-mode delimiters wrapped around the returned LaTeX.
pub const MATH_OPEN: &str = "$$";
pub const MATH_CLOSE: &str = "$$";

// Status lines.
pub const STATUS_EMPTY_INPUT: &str = "write an operation first.";
pub const STATUS_FETCHING_KEY: &str = "fetching API key...";
pub const STATUS_KEY_FAILED: &str = "error: could not obtain the API key.";
pub const STATUS_REQUESTING: &str = "consulting the model...";
pub const STATUS_SUCCESS: &str = "operation evaluated successfully ✓";
pub const STATUS_FAILED: &str = "an error occurred calling the API or parsing the JSON.";
pub const STATUS_INTERRUPTED: &str = "interrupted.";

// Result region placeholders.
pub const PLACEHOLDER_EMPTY: &str = "no result yet…";
pub const PLACEHOLDER_PENDING: &str = "calculating…";
pub const PLACEHOLDER_FAILED: &str = "no result due to error…";
