//! Prompt text sent to the think service

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A request for the think service.
///
/// Owned, immutable text. The constructor rejects empty input, so every
/// transport can assume a non-empty payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Create a prompt, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        Ok(Self(text))
    }

    /// Get the prompt text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt, returning the text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Prompt::new(s)
    }
}

impl TryFrom<String> for Prompt {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Prompt::new(s)
    }
}
