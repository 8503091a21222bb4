/*
 *  error.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fetch and playout error types
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use thiserror::Error;

/// Retrieving a resource failed before any content was parsed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not build the HTTP client.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Network level failure (connect, timeout, body read).
    #[error("HTTP request error: {source}")]
    Http {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP status {status}")]
    Status { locator: String, status: u16 },

    /// Reading a local file failed.
    #[error("I/O error: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// The locator cannot be resolved to a fetchable resource.
    #[error("invalid locator: {reason}")]
    InvalidLocator { locator: String, reason: String },
}

/// A resource could not be turned into a usable document.
#[derive(Debug, Error)]
pub enum PlayoutError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Malformed JSON or a document of the wrong shape.
    #[error("JSON parse error: {source}")]
    Parse {
        locator: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PlayoutError {
    pub fn parse(locator: &str, source: serde_json::Error) -> Self {
        PlayoutError::Parse {
            locator: locator.to_string(),
            source,
        }
    }

    /// Human readable message for fallback displays.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_code() {
        let err = PlayoutError::from(FetchError::Status {
            locator: "pages/b.json".into(),
            status: 404,
        });
        assert_eq!(err.message(), "HTTP status 404");
    }

    #[test]
    fn test_parse_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PlayoutError::parse("a.json", source);
        assert!(err.message().starts_with("JSON parse error: "));
    }
}
