/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::errors::SitesError;
use scraper::{ElementRef, Html, Node};
use serde_json::Value;

/// Outcome of decoding a command response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `result.section` of a successful response
    Section(Value),
    /// No top level `result`: the node does not exist or is not visible
    NotFound,
}

impl Response {
    /// Interprets an already parsed record tree
    pub fn from_tree(tree: Value) -> Result<Self, SitesError> {
        let mut body = match tree {
            Value::Object(body) => body,
            other => {
                return Err(SitesError::MalformedResponse(format!(
                    "expected an object at the top level, got {}",
                    kind_of(&other)
                )));
            }
        };
        Ok(match body.remove("result") {
            Some(Value::Object(mut result)) => {
                Response::Section(result.remove("section").unwrap_or(Value::Null))
            }
            Some(_) => Response::Section(Value::Null),
            None => Response::NotFound,
        })
    }

    /// Records under `section.groups` (root listing)
    pub fn groups(&self) -> &[Value] {
        self.section_array("groups")
    }

    /// Records under `section.items` (album listing)
    pub fn items(&self) -> &[Value] {
        self.section_array("items")
    }

    /// The section itself, for single item detail responses
    pub fn record(&self) -> Option<&Value> {
        match self {
            Response::Section(section) if section.is_object() => Some(section),
            _ => None,
        }
    }

    fn section_array(&self, key: &str) -> &[Value] {
        match self {
            Response::Section(section) => section
                .get(key)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            Response::NotFound => &[],
        }
    }
}

/// Decodes the JavaScript object literal returned with `format=js`.
pub fn decode(raw: &str) -> Result<Response, SitesError> {
    Response::from_tree(parse_tree(raw)?)
}

/// Parses a response body into a generic record tree without interpreting it
pub fn parse_tree(raw: &str) -> Result<Value, SitesError> {
    Ok(json5::from_str(raw)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Reads a string field, absent or null is ""
pub(crate) fn str_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

// Reads an integer field, absent or unparsable is 0
pub(crate) fn int_field(record: &Value, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

// Reads an id/count field, negatives clamp to 0
pub(crate) fn uint_field(record: &Value, key: &str) -> u64 {
    u64::try_from(int_field(record, key)).unwrap_or_default()
}

// Elements that start a new line of text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

// Elements whose content is never text
const SKIPPED_TAGS: &[&str] = &["script", "style", "template"];

/// Renders rich text markup as plain text.
///
/// All tags are dropped. Text inside separate block level elements ends up on
/// separate lines, blank lines are removed and runs of whitespace collapse to
/// a single space.
pub fn html_to_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(markup);
    let mut lines = Vec::new();
    let mut current = String::new();
    collect_text(fragment.root_element(), &mut lines, &mut current);
    end_line(&mut lines, &mut current);
    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) if SKIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(el) => {
                let is_block = BLOCK_TAGS.contains(&el.name());
                if is_block {
                    end_line(lines, current);
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, lines, current);
                }
                if is_block {
                    end_line(lines, current);
                }
            }
            _ => {}
        }
    }
}

fn end_line(lines: &mut Vec<String>, current: &mut String) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
