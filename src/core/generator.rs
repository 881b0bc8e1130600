use std::error::Error as StdError;
use std::fmt;

/// The external text-generation collaborator.
///
/// The controller only ever sees this trait; the production implementation is
/// [`crate::api::gemini::GeminiClient`], and tests substitute scripted fakes.
#[async_trait::async_trait]
pub trait SceneGenerator: Send + Sync {
    /// Send one complete prompt and return the generated text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Everything that can go wrong while waiting on a generation.
///
/// None of this detail reaches the user; it is written to the diagnostic log.
#[derive(Debug)]
pub enum GenerateError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: u16, summary: String },
    /// The body was not a `generateContent` response.
    Decode(String),
    /// The response carried no text, e.g. a safety block.
    EmptyResponse { finish_reason: Option<String> },
}

impl GenerateError {
    /// Short machine-friendly name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::Transport(_) => "transport",
            GenerateError::Status { .. } => "status",
            GenerateError::Decode(_) => "decode",
            GenerateError::EmptyResponse { .. } => "empty_response",
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Transport(source) => write!(f, "request failed: {source}"),
            GenerateError::Status { status, summary } => {
                write!(f, "API request failed with status {status}: {summary}")
            }
            GenerateError::Decode(detail) => write!(f, "malformed response: {detail}"),
            GenerateError::EmptyResponse {
                finish_reason: Some(reason),
            } => write!(f, "response contained no text (finish reason: {reason})"),
            GenerateError::EmptyResponse { finish_reason: None } => {
                write!(f, "response contained no text")
            }
        }
    }
}

impl StdError for GenerateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            GenerateError::Transport(source) => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_decode() {
            GenerateError::Decode(source.to_string())
        } else {
            GenerateError::Transport(source)
        }
    }
}
