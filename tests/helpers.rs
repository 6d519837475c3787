/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use shutterfly_sites::sites::{FetchRequest, SitesError, Transport};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const SITE: &str = "familytrip";

// What a request looked like when it reached the transport
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub node_id: u64,
    pub layout: String,
    pub page: String,
}

// In-memory transport answering from canned bodies keyed by (node id, layout).
// Unknown keys get a body without `result`.
#[allow(dead_code)]
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: HashMap<(u64, String), String>,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub(crate) fn respond(mut self, node_id: u64, layout: &str, body: &str) -> Self {
        self.responses
            .insert((node_id, layout.to_string()), body.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, layout: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.layout == layout)
            .collect()
    }
}

impl Transport for MockTransport {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, SitesError> {
        self.calls.lock().unwrap().push(Call {
            node_id: request.node_id,
            layout: request.layout.to_string(),
            page: request.page(),
        });
        Ok(self
            .responses
            .get(&(request.node_id, request.layout.to_string()))
            .cloned()
            .unwrap_or_else(|| "{error: 'Node not found'}".to_string()))
    }
}

// Root listing with the "Trip" album, in the relaxed syntax the service emits
#[allow(dead_code)]
pub(crate) const TRIP_ALBUMS: &str = r#"{
    result: {
        section: {
            groups: [
                {nodeType: 'albumGroup', title: 'Trip', count: 2, nodeId: 100,},
            ],
        },
    },
}"#;

#[allow(dead_code)]
pub(crate) const TRIP_ITEMS: &str = r#"{
    result: {
        section: {
            items: [
                {nodeType: 'shutterflyItem', title: 'Beach', nodeId: 101, comments: 0, created: 1300000000, modified: 1300000500},
                {nodeType: 'shutterflyItem', title: 'Sunset', nodeId: 102, comments: 1, text: '<p>Golden <i>hour</i></p>'},
            ],
        },
    },
}"#;

#[allow(dead_code)]
pub(crate) const SUNSET_DETAIL: &str = r#"{
    result: {
        section: {nodeType: 'shutterflyItem', nodeId: 102, commentList: [{text: "Nice!"}]},
    },
}"#;

// Transport serving the "Trip" scenario under the organised root only
#[allow(dead_code)]
pub(crate) fn trip_transport() -> MockTransport {
    MockTransport::default()
        .respond(5, "ManagementAlbums", TRIP_ALBUMS)
        .respond(100, "ManagementAlbumPictures", TRIP_ITEMS)
        .respond(102, "ManagementPicture", SUNSET_DETAIL)
}
