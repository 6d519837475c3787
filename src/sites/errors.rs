/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum SitesError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Relaxed JSON decode error: {0}")]
    Decode(#[from] json5::Error),

    #[error("Failed serializing to JSON")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("CSV write error")]
    Csv(#[from] csv::Error),

    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Response is malformed: {0}")]
    MalformedResponse(String),

    #[error(
        "Incorrect number of items for album '{album_title}' ({album_node_id}). Expected {expected}, got {actual}"
    )]
    CountMismatch {
        album_node_id: u64,
        album_title: String,
        expected: u64,
        actual: u64,
    },

    #[error("Item {0} has no album parent")]
    OrphanedItem(u64),
}

impl SitesError {
    /// Whether the failure is transient and the request may be reissued
    pub fn is_retryable(&self) -> bool {
        match self {
            SitesError::Request(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            SitesError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
