// ABOUTME: Error reported by a cloud provider call.
// ABOUTME: Carries the provider's numeric code (if any) and message untouched.

use thiserror::Error;

/// An error surfaced by the provider adapter.
///
/// `code` is the HTTP-style status the provider attached to the failure.
/// A missing code is `None`, which is distinct from `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.message, .code))]
pub struct ProviderError {
    pub code: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self::new(Some(code), message)
    }

    pub fn without_code(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    pub fn has_code(&self, code: u16) -> bool {
        self.code == Some(code)
    }
}

fn render(message: &str, code: &Option<u16>) -> String {
    match code {
        Some(code) => format!("{message} (code {code})"),
        None => message.to_string(),
    }
}
