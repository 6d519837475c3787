/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::parsers::{html_to_text, int_field, str_field, uint_field};
use crate::sites::{Album, NodeKind};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

/// A photo (or other media item) inside an album.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,

    /// Description as stored upstream (markup)
    pub description_html: String,

    pub created: i64,
    pub modified: i64,

    /// When the photo was taken, as reported by the upload
    pub capture_date: i64,

    pub node_id: u64,

    /// Number of comments the listing reports for this item
    pub declared_comment_count: u64,

    /// Comment texts in the order the server returned them
    pub comments: Vec<String>,

    // Node id of the owning album
    parent: Option<u64>,
}

impl Item {
    /// Projects a raw `shutterflyItem` record into an Item with no parent.
    ///
    /// Returns `None` when the record declares a different `nodeType`.
    pub fn from_record(record: &Value) -> Option<Self> {
        if !is_item_record(record) {
            warn!(
                "Error creating item: record nodeId {} is of nodeType \"{}\", not \"{}\"",
                int_field(record, "nodeId"),
                str_field(record, "nodeType"),
                NodeKind::ShutterflyItem
            );
            return None;
        }
        let item = Self {
            title: str_field(record, "title"),
            description_html: str_field(record, "text"),
            created: int_field(record, "created"),
            modified: int_field(record, "modified"),
            capture_date: int_field(record, "capture_date"),
            node_id: uint_field(record, "nodeId"),
            declared_comment_count: uint_field(record, "comments"),
            comments: Vec::new(),
            parent: None,
        };
        debug!("Created item object with title: {}", item.title);
        Some(item)
    }

    /// Links this item to the album it was listed under
    pub fn attach_to(&mut self, album: &Album) {
        self.parent = Some(album.node_id);
    }

    /// Node id of the owning album, if attached
    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    /// Whether the listing reported a comment thread worth fetching
    pub fn has_comments(&self) -> bool {
        self.declared_comment_count > 0
    }

    /// Appends the comments of an item detail record.
    ///
    /// Returns the number of comments taken, 0 when the record is not an item.
    pub fn add_comments_from(&mut self, detail: &Value) -> usize {
        if !is_item_record(detail) {
            warn!(
                "Detail for item {} is not a \"{}\" record, leaving comments empty",
                self.node_id,
                NodeKind::ShutterflyItem
            );
            return 0;
        }
        let entries = detail
            .get("commentList")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        self.comments
            .extend(entries.iter().map(|entry| str_field(entry, "text")));
        entries.len()
    }

    /// Plain text rendering of the description
    pub fn description(&self) -> String {
        html_to_text(&self.description_html)
    }
}

fn is_item_record(record: &Value) -> bool {
    str_field(record, "nodeType") == <&str>::from(NodeKind::ShutterflyItem)
}
