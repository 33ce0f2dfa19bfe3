//! Docrecon Generative Provider Layer
//!
//! Implementations of the `GenerativeProvider` trait from `docrecon-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic scripted double for testing
//! - `GeminiProvider`: Google Gemini REST API integration
//!
//! # Examples
//!
//! ```
//! use docrecon_llm::MockProvider;
//! use docrecon_domain::GenerativeProvider;
//!
//! let provider = MockProvider::new("Hello from the model");
//! let result = provider.generate("any prompt").unwrap();
//! assert_eq!(result, "Hello from the model");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use docrecon_domain::GenerativeProvider;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during generative calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key supplied via argument or environment
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One scripted reply for the mock provider
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(String),
}

/// Deterministic mock provider for testing.
///
/// Replies are consumed from a FIFO script; when the script is empty the
/// default reply is returned. No network calls are made.
///
/// # Examples
///
/// ```
/// use docrecon_llm::MockProvider;
/// use docrecon_domain::GenerativeProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_response("first");
/// provider.push_error("quota exceeded");
///
/// assert_eq!(provider.generate("p").unwrap(), "first");
/// assert!(provider.generate("p").is_err());
/// assert_eq!(provider.generate("p").unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: Reply,
    script: Arc<Mutex<VecDeque<Reply>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider whose default reply is a fixed response text
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: Reply::Text(response.into()),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a provider that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_reply: Reply::Error(message.into()),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Enqueue a scripted successful response
    pub fn push_response(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Reply::Text(response.into()));
    }

    /// Enqueue a scripted failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Reply::Error(message.into()));
    }

    /// Number of times `generate` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl GenerativeProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.generate("any prompt").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_script_order() {
        let provider = MockProvider::new("default");
        provider.push_response("one");
        provider.push_response("two");

        assert_eq!(provider.generate("p").unwrap(), "one");
        assert_eq!(provider.generate("p").unwrap(), "two");
        assert_eq!(provider.generate("p").unwrap(), "default");
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing("boom");

        for _ in 0..5 {
            let result = provider.generate("p");
            assert!(matches!(result, Err(LlmError::Other(_))));
        }
        assert_eq!(provider.call_count(), 5);
    }

    #[test]
    fn test_mock_provider_error_then_success() {
        let provider = MockProvider::new("ok");
        provider.push_error("transient");

        assert!(provider.generate("p").is_err());
        assert_eq!(provider.generate("p").unwrap(), "ok");
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("p").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
