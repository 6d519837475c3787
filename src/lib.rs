/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Shutterfly Sites
//!
//! This library extracts album and photo metadata from a Shutterfly Sites
//! website through the private `getitems` command endpoint used by the site
//! management pages, and writes it out as CSV tables.
//!
//! ## Features
//!
//! - Album information (title, description, timestamps, declared item count)
//! - Item information, including the comment thread of commented items
//! - Cross-checks every album's declared item count against what was returned
//! - Flattens the result into `albums.csv` and `photos.csv`
//! - Session (cookie) reuse across the whole crawl, request timeout, throttling
//!   and retry with backoff
//!
//! *The endpoint answers with JavaScript object literals rather than strict
//! JSON. Responses are decoded with a JSON5 parser.*
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shutterfly_sites::sites::{ApiClient, ClientOptions, Crawler, export_to_dir};
//! use std::path::Path;
//!
//! async fn dump_site(site_name: &str) -> anyhow::Result<()> {
//!     // One client is one session, shared by every request of the crawl
//!     let client = ApiClient::new(ClientOptions::default())?;
//!
//!     // Walk both root collections of the site
//!     let crawl = Crawler::new(client, site_name).crawl_site().await?;
//!
//!     // Writes albums.csv and photos.csv
//!     export_to_dir(Path::new("."), &crawl)?;
//!     Ok(())
//! }
//! ```
//!
pub mod sites;
