//! Address parsing and pattern matching
//!
//! OSC-style addresses are slash-separated paths:
//! ```text
//! /think
//! /agent/reply/0
//! ```
//!
//! Dispatch patterns may use wildcards:
//! - `*` matches exactly one segment
//! - `**` matches any number of segments
//!
//! So `/*` matches any single-segment address (including `/think`), and
//! `/**` matches everything.

use crate::{Error, Result};

/// A parsed OSC-style address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    raw: String,
    segments: Vec<String>,
}

impl Address {
    /// Parse an address string
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".to_string()));
        }

        if !s.starts_with('/') {
            return Err(Error::InvalidAddress(format!(
                "address must start with '/': {}",
                s
            )));
        }

        let segments: Vec<String> = s[1..].split('/').map(|s| s.to_string()).collect();

        for (i, seg) in segments.iter().enumerate() {
            if seg.is_empty() && i < segments.len() - 1 {
                return Err(Error::InvalidAddress(format!(
                    "empty segment in address: {}",
                    s
                )));
            }
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }

    /// Get the raw address string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the address segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this address contains wildcards
    pub fn is_pattern(&self) -> bool {
        self.segments.iter().any(|s| s == "*" || s == "**")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Address::parse(&s)
    }
}

/// A compiled pattern for dispatch-table matching
#[derive(Debug, Clone)]
pub struct Pattern {
    address: Address,
    regex: Option<regex_lite::Regex>,
}

impl Pattern {
    /// Compile a pattern from an address string.
    ///
    /// Literal patterns match exactly; wildcard patterns are lowered to a
    /// regex once at compile time.
    pub fn compile(s: &str) -> Result<Self> {
        let address = Address::parse(s)?;

        let regex = if address.is_pattern() {
            let regex_str = s
                .replace("**", "§§") // placeholder so '*' replacement doesn't clobber it
                .replace('*', "[^/]+")
                .replace("§§", ".*");
            let regex_str = format!("^{}$", regex_str);
            Some(
                regex_lite::Regex::new(&regex_str)
                    .map_err(|e| Error::InvalidPattern(e.to_string()))?,
            )
        } else {
            None
        };

        Ok(Self { address, regex })
    }

    /// Check if an address string matches this pattern
    pub fn matches(&self, addr: &str) -> bool {
        if let Some(regex) = &self.regex {
            regex.is_match(addr)
        } else {
            addr == self.address.as_str()
        }
    }

    /// Check if a parsed [`Address`] matches this pattern
    pub fn matches_address(&self, addr: &Address) -> bool {
        self.matches(addr.as_str())
    }

    /// Get the underlying address
    pub fn address(&self) -> &Address {
        &self.address
    }
}
