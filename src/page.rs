/*
 *  page.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Page and channel descriptor documents
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

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::constants::DEFAULT_SECONDS_PER_PAGE;
use crate::deutils::{
    default_seconds_per_page, deserialize_locators_lenient, deserialize_null_default,
    deserialize_seconds_lenient,
};

/// One screenful of content.
///
/// ```json
/// { "statusLine": "P100 NEWS", "bigHeader": "NEWS", "lines": ["{C}Hello"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_line: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_header: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub lines: Vec<String>,
}

impl Page {
    /// Parses a page resource. The document must be a JSON object; fields
    /// of the wrong type are a parse error, missing or null ones default.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("page must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Pretty JSON with two space indentation, as written by the authoring tool.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn status_line(&self) -> &str {
        self.status_line.as_deref().unwrap_or("")
    }

    /// The banner text, treating an empty string as no banner.
    pub fn big_header(&self) -> Option<&str> {
        self.big_header.as_deref().filter(|h| !h.is_empty())
    }
}

/// The top level playlist document.
///
/// ```json
/// { "secondsPerPage": 8, "pages": ["pages/100.json", "pages/101.json"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDescriptor {
    #[serde(default = "default_seconds_per_page", deserialize_with = "deserialize_seconds_lenient")]
    pub seconds_per_page: f64,

    #[serde(default, deserialize_with = "deserialize_locators_lenient")]
    pub pages: Vec<String>,
}

impl Default for ChannelDescriptor {
    fn default() -> Self {
        Self {
            seconds_per_page: DEFAULT_SECONDS_PER_PAGE,
            pages: Vec::new(),
        }
    }
}

impl ChannelDescriptor {
    /// Parses a channel descriptor. Malformed JSON or a non-object document
    /// is an error; bad `secondsPerPage` or `pages` fields fall back to
    /// their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("channel descriptor must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Out-of-range intervals fall back to the default rather than panic.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.seconds_per_page)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_SECONDS_PER_PAGE))
    }
}
