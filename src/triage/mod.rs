pub mod types;
pub mod locale;
pub mod sanitize;
pub mod prompt;
pub mod normalizer;
pub mod emergency;
pub mod ollama;
pub mod service;
pub mod conversation;

pub use types::*;
pub use sanitize::*;
pub use prompt::*;
pub use normalizer::*;
pub use emergency::*;
pub use ollama::*;
pub use service::*;
pub use conversation::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Ollama is not running at {0}")]
    OllamaConnection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    OllamaError { status: u16, body: String },

    #[error("Model {0} is not available")]
    ModelUnavailable(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Input text is empty after sanitization")]
    EmptyInput,
}
