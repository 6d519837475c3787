/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::errors::SitesError;
use crate::sites::parsers::{Response, parse_tree};
use crate::sites::{Album, FetchRequest, Item, Layout, RootCollection, Transport};
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Layout used for single item detail (comment thread) requests
pub const DEFAULT_DETAIL_LAYOUT: &str = "ManagementPicture";

/// Knobs for a crawl that are not part of the transport
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub detail_layout: String,

    /// When set, every decoded response is also saved here as pretty JSON
    pub dump_dir: Option<PathBuf>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            detail_layout: DEFAULT_DETAIL_LAYOUT.to_string(),
            dump_dir: None,
        }
    }
}

/// Albums and items gathered by a crawl, in the order they were retrieved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Crawl {
    pub albums: Vec<Album>,
    pub items: Vec<Item>,
}

impl Crawl {
    /// Appends the results of another crawl after this one
    pub fn extend(&mut self, other: Crawl) {
        self.albums.extend(other.albums);
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.items.is_empty()
    }
}

/// Walks the album hierarchy of one site.
///
/// Every request goes through the same transport, so the transport's session
/// is shared by all roots crawled with this `Crawler`.
#[derive(Debug)]
pub struct Crawler<T> {
    transport: T,
    site_name: String,
    options: CrawlOptions,
}

impl<T: Transport> Crawler<T> {
    pub fn new(transport: T, site_name: &str) -> Self {
        Self::with_options(transport, site_name, CrawlOptions::default())
    }

    pub fn with_options(transport: T, site_name: &str, options: CrawlOptions) -> Self {
        Self {
            transport,
            site_name: site_name.to_string(),
            options,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Crawls every root collection of the site and concatenates the results
    pub async fn crawl_site(&self) -> Result<Crawl, SitesError> {
        let mut crawl = Crawl::default();
        for root in RootCollection::ALL {
            crawl.extend(self.walk(root).await?);
        }
        info!(
            "Crawled {} albums and {} items for site {}",
            crawl.albums.len(),
            crawl.items.len(),
            self.site_name
        );
        Ok(crawl)
    }

    /// Retrieves the albums under a root and the items (with comments) of each.
    ///
    /// A root that does not exist yields an empty crawl. An album whose listing
    /// does not hold exactly the number of items it declares aborts the walk with
    /// [`SitesError::CountMismatch`].
    pub async fn walk(&self, root: RootCollection) -> Result<Crawl, SitesError> {
        info!(
            "Walking root {} ({}{})",
            root.node_id, self.site_name, root.path
        );
        let mut crawl = Crawl::default();

        let listing = self
            .fetch(root.node_id, Layout::ManagementAlbums.into(), root.path)
            .await?;
        if listing == Response::NotFound {
            warn!("Root node {} was not found, skipping", root.node_id);
            return Ok(crawl);
        }
        debug!("albums len: {}", listing.groups().len());

        for record in listing.groups() {
            let Some(album) = Album::from_record(record) else {
                continue;
            };
            let items = self.album_items(&album, root.path).await?;
            crawl.items.extend(items);
            crawl.albums.push(album);
        }
        Ok(crawl)
    }

    async fn album_items(&self, album: &Album, path: &str) -> Result<Vec<Item>, SitesError> {
        info!("Retrieving items of album '{}' ({})", album.title, album.node_id);
        let listing = self
            .fetch(album.node_id, Layout::ManagementAlbumPictures.into(), path)
            .await?;
        if listing == Response::NotFound {
            warn!("Album node {} was not found, treating as empty", album.node_id);
        }

        let records = listing.items();
        let actual = records.len() as u64;
        if actual != album.expected_item_count {
            let err = SitesError::CountMismatch {
                album_node_id: album.node_id,
                album_title: album.title.clone(),
                expected: album.expected_item_count,
                actual,
            };
            error!("{}", err);
            return Err(err);
        }
        debug!("Got correct number of items for this album");

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let Some(mut item) = Item::from_record(record) else {
                continue;
            };
            item.attach_to(album);
            if item.has_comments() {
                self.fetch_comments(&mut item, path).await?;
            }
            items.push(item);
        }
        Ok(items)
    }

    async fn fetch_comments(&self, item: &mut Item, path: &str) -> Result<(), SitesError> {
        let detail_layout = self.options.detail_layout.as_str();
        let detail = self.fetch(item.node_id, detail_layout, path).await?;
        match detail.record() {
            Some(record) => {
                let taken = item.add_comments_from(record);
                debug!(
                    "Item {} has {} comments ({} declared)",
                    item.node_id, taken, item.declared_comment_count
                );
            }
            None => warn!("No detail record for item {}, leaving comments empty", item.node_id),
        }
        Ok(())
    }

    async fn fetch(&self, node_id: u64, layout: &str, path: &str) -> Result<Response, SitesError> {
        debug!(
            "Getting {} for site {} with nodeId {}",
            layout, self.site_name, node_id
        );
        let request = FetchRequest::new(&self.site_name, node_id, layout, path);
        let raw = self.transport.fetch(&request).await?;
        let tree = parse_tree(&raw)?;
        if let Some(dump_dir) = &self.options.dump_dir {
            let dump_path = dump_dir.join(format!("{}-{}.json", layout, node_id));
            debug!("Saving json data to {}", dump_path.display());
            std::fs::create_dir_all(dump_dir)?;
            std::fs::write(dump_path, serde_json::to_string_pretty(&tree)?)?;
        }
        Response::from_tree(tree)
    }
}
