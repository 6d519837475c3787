/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::sites::errors::SitesError;
use strum_macros::{Display, IntoStaticStr};

/// Navigation node id of the organised albums collection
pub const PICTURES_ROOT_ID: u64 = 5;

/// Navigation node id of the default (uncategorised) collection
pub const DEFAULT_ROOT_ID: u64 = 24;

/// Listing layouts understood by the command endpoint.
///
/// The single-item detail layout is not fixed here since it is configured
/// through [`CrawlOptions`](crate::sites::CrawlOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Layout {
    ManagementAlbums,
    ManagementAlbumPictures,
}

/// Discriminator values found in a record's `nodeType` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum NodeKind {
    #[strum(to_string = "albumGroup")]
    AlbumGroup,
    #[strum(to_string = "shutterflyItem")]
    ShutterflyItem,
}

/// One of the top-level groupings a site exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCollection {
    pub node_id: u64,
    pub path: &'static str,
}

impl RootCollection {
    /// Organised albums, fetched under the `/pictures` page
    pub const PICTURES: RootCollection = RootCollection {
        node_id: PICTURES_ROOT_ID,
        path: "/pictures",
    };

    /// Default bucket, fetched against the bare site page
    pub const DEFAULT: RootCollection = RootCollection {
        node_id: DEFAULT_ROOT_ID,
        path: "",
    };

    /// Every root a full site crawl walks, in crawl order
    pub const ALL: [RootCollection; 2] = [Self::PICTURES, Self::DEFAULT];
}

/// Parameters for a single `getitems` command.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub site_name: &'a str,
    pub node_id: u64,
    pub layout: &'a str,
    pub path: &'a str,
}

impl<'a> FetchRequest<'a> {
    pub fn new(site_name: &'a str, node_id: u64, layout: &'a str, path: &'a str) -> Self {
        Self {
            site_name,
            node_id,
            layout,
            path,
        }
    }

    /// The `page` form field, the site name followed by the path fragment
    pub fn page(&self) -> String {
        format!("{}{}", self.site_name, self.path)
    }

    /// Form fields for the request body. Paging is disabled by the `-1` sentinels.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startIndex", "0".to_string()),
            ("size", "-1".to_string()),
            ("pageSize", "-1".to_string()),
            ("page", self.page()),
            ("nodeId", self.node_id.to_string()),
            ("layout", self.layout.to_string()),
            ("format", "js".to_string()),
        ]
    }
}

/// Issues commands against the remote API and hands back the raw body.
///
/// Implementations own whatever session state the service needs (cookies,
/// connection affinity) and must reuse it for every call they serve.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, SitesError>;
}

impl<T: Transport> Transport for &T {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, SitesError> {
        (**self).fetch(request).await
    }
}
