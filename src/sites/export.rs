/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::errors::SitesError;
use crate::sites::{Album, Crawl, Item};
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ALBUMS_FILE: &str = "albums.csv";
pub const PHOTOS_FILE: &str = "photos.csv";

pub const ALBUM_HEADERS: [&str; 6] = [
    "title",
    "description",
    "created",
    "modified",
    "count",
    "node_id",
];

pub const ITEM_HEADERS: [&str; 8] = [
    "title",
    "description",
    "comments",
    "created",
    "modified",
    "node_id",
    "album_title",
    "album_node_id",
];

/// One line of `albums.csv`
#[derive(Serialize, Debug, PartialEq)]
pub struct AlbumRow<'a> {
    pub title: &'a str,
    pub description: String,
    pub created: i64,
    pub modified: i64,
    pub count: u64,
    pub node_id: u64,
}

impl<'a> From<&'a Album> for AlbumRow<'a> {
    fn from(album: &'a Album) -> Self {
        Self {
            title: &album.title,
            description: album.description(),
            created: album.created,
            modified: album.modified,
            count: album.expected_item_count,
            node_id: album.node_id,
        }
    }
}

/// One line of `photos.csv`
#[derive(Serialize, Debug, PartialEq)]
pub struct ItemRow<'a> {
    pub title: &'a str,
    pub description: String,
    pub comments: String,
    pub created: i64,
    pub modified: i64,
    pub node_id: u64,
    pub album_title: &'a str,
    pub album_node_id: u64,
}

impl<'a> ItemRow<'a> {
    fn new(item: &'a Item, album: &'a Album) -> Self {
        Self {
            title: &item.title,
            description: item.description(),
            comments: item.comments.join("\n"),
            created: item.created,
            modified: item.modified,
            node_id: item.node_id,
            album_title: &album.title,
            album_node_id: album.node_id,
        }
    }
}

/// Flattens albums into rows
pub fn album_rows(albums: &[Album]) -> Vec<AlbumRow<'_>> {
    albums.iter().map(AlbumRow::from).collect()
}

/// Flattens items into rows, joining each to its parent album.
///
/// Fails with [`SitesError::OrphanedItem`] when an item has no parent or the
/// parent is not among `albums`.
pub fn item_rows<'a>(
    items: &'a [Item],
    albums: &'a [Album],
) -> Result<Vec<ItemRow<'a>>, SitesError> {
    let by_node_id: HashMap<u64, &Album> = albums.iter().map(|a| (a.node_id, a)).collect();
    items
        .iter()
        .map(|item| {
            item.parent()
                .and_then(|parent| by_node_id.get(&parent).copied())
                .map(|album| ItemRow::new(item, album))
                .ok_or(SitesError::OrphanedItem(item.node_id))
        })
        .collect()
}

/// Writes the album table, header first. Returns the number of rows.
pub fn write_albums<W: Write>(writer: W, albums: &[Album]) -> Result<usize, SitesError> {
    write_rows(writer, &ALBUM_HEADERS, &album_rows(albums))
}

/// Writes the photo table, header first. Returns the number of rows.
pub fn write_items<W: Write>(
    writer: W,
    items: &[Item],
    albums: &[Album],
) -> Result<usize, SitesError> {
    write_rows(writer, &ITEM_HEADERS, &item_rows(items, albums)?)
}

fn write_rows<W: Write, R: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[R],
) -> Result<usize, SitesError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Paths of the tables written by [`export_to_dir`]
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub albums: PathBuf,
    pub photos: PathBuf,
}

/// Writes `albums.csv` and `photos.csv` into `dir`.
///
/// Rows are joined before either file is created, so an orphaned item leaves
/// the directory untouched.
pub fn export_to_dir(dir: &Path, crawl: &Crawl) -> Result<ExportPaths, SitesError> {
    let albums = album_rows(&crawl.albums);
    let items = item_rows(&crawl.items, &crawl.albums)?;

    std::fs::create_dir_all(dir)?;
    let paths = ExportPaths {
        albums: dir.join(ALBUMS_FILE),
        photos: dir.join(PHOTOS_FILE),
    };
    write_rows(File::create(&paths.albums)?, &ALBUM_HEADERS, &albums)?;
    info!("Wrote {} albums to {}", albums.len(), paths.albums.display());
    write_rows(File::create(&paths.photos)?, &ITEM_HEADERS, &items)?;
    info!("Wrote {} photos to {}", items.len(), paths.photos.display());
    Ok(paths)
}
