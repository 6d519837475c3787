/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod album;
pub mod api;
pub mod client;
pub mod crawl;
pub mod errors;
pub mod export;
pub mod item;
pub mod parsers;

pub use album::*;
pub use api::*;
pub use client::*;
pub use crawl::*;
pub use errors::*;
pub use export::*;
pub use item::*;
pub use parsers::{Response, decode, html_to_text, parse_tree};
