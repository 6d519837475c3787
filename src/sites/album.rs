/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::NodeKind;
use crate::sites::parsers::{html_to_text, int_field, str_field, uint_field};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

/// An album group listed under one of the site's root collections.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Album {
    pub title: String,

    /// Description as stored upstream (markup)
    pub description_html: String,

    pub created: i64,
    pub modified: i64,

    /// Number of items the server claims the album holds
    pub expected_item_count: u64,

    pub node_id: u64,
}

impl Album {
    /// Projects a raw `albumGroup` record into an Album.
    ///
    /// Returns `None` when the record declares a different `nodeType`; missing
    /// fields default to empty/zero.
    pub fn from_record(record: &Value) -> Option<Self> {
        let node_type = str_field(record, "nodeType");
        if node_type != <&str>::from(NodeKind::AlbumGroup) {
            warn!(
                "Error creating album: record nodeId {} is of nodeType \"{}\", not \"{}\"",
                int_field(record, "nodeId"),
                node_type,
                NodeKind::AlbumGroup
            );
            return None;
        }
        let album = Self {
            title: str_field(record, "title"),
            description_html: str_field(record, "text"),
            created: int_field(record, "created"),
            modified: int_field(record, "modified"),
            expected_item_count: uint_field(record, "count"),
            node_id: uint_field(record, "nodeId"),
        };
        debug!("Created album object with title: {}", album.title);
        Some(album)
    }

    /// Plain text rendering of the description
    pub fn description(&self) -> String {
        html_to_text(&self.description_html)
    }
}
