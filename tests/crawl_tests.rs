/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, MockTransport, SITE, TRIP_ALBUMS, TRIP_ITEMS};
    use shutterfly_sites::sites::{
        CrawlOptions, Crawler, RootCollection, SitesError, write_albums, write_items,
    };

    async fn export_bytes(transport: MockTransport) -> (String, String) {
        let crawl = Crawler::new(transport, SITE).crawl_site().await.unwrap();
        let mut albums = Vec::new();
        let mut photos = Vec::new();
        write_albums(&mut albums, &crawl.albums).unwrap();
        write_items(&mut photos, &crawl.items, &crawl.albums).unwrap();
        (
            String::from_utf8(albums).unwrap(),
            String::from_utf8(photos).unwrap(),
        )
    }

    #[tokio::test]
    async fn trip_album_with_one_commented_photo() {
        let (albums, photos) = export_bytes(helpers::trip_transport()).await;

        assert_eq!(
            albums,
            "title,description,created,modified,count,node_id\n\
             Trip,,0,0,2,100\n"
        );
        assert_eq!(
            photos,
            "title,description,comments,created,modified,node_id,album_title,album_node_id\n\
             Beach,,,1300000000,1300000500,101,Trip,100\n\
             Sunset,Golden hour,Nice!,0,0,102,Trip,100\n"
        );
    }

    #[tokio::test]
    async fn both_roots_share_one_transport() {
        let crawler = Crawler::new(helpers::trip_transport(), SITE);
        crawler.crawl_site().await.unwrap();

        let roots = crawler.transport().calls_for("ManagementAlbums");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].node_id, 5);
        assert_eq!(roots[0].page, "familytrip/pictures");
        assert_eq!(roots[1].node_id, 24);
        assert_eq!(roots[1].page, "familytrip");
    }

    #[tokio::test]
    async fn results_of_both_roots_are_concatenated() {
        let transport = helpers::trip_transport()
            .respond(
                24,
                "ManagementAlbums",
                "{result: {section: {groups: [{nodeType: 'albumGroup', title: 'Misc', count: 1, nodeId: 200}]}}}",
            )
            .respond(
                200,
                "ManagementAlbumPictures",
                "{result: {section: {items: [{nodeType: 'shutterflyItem', title: 'Cat', nodeId: 201}]}}}",
            );
        let crawl = Crawler::new(transport, SITE).crawl_site().await.unwrap();

        let album_ids: Vec<u64> = crawl.albums.iter().map(|a| a.node_id).collect();
        let item_ids: Vec<u64> = crawl.items.iter().map(|i| i.node_id).collect();
        assert_eq!(album_ids, vec![100, 200]);
        assert_eq!(item_ids, vec![101, 102, 201]);
        assert_eq!(crawl.items[2].parent(), Some(200));
        assert_eq!(crawl.items[2].title, "Cat");
    }

    #[tokio::test]
    async fn missing_root_result_is_an_empty_crawl() {
        let transport = MockTransport::default()
            .respond(5, "ManagementAlbums", "{error: 'Not authorized',}");
        let crawler = Crawler::new(transport, SITE);

        let crawl = crawler.walk(RootCollection::PICTURES).await.unwrap();

        assert!(crawl.is_empty());
        assert_eq!(crawler.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn count_mismatch_aborts_the_crawl() {
        let albums = TRIP_ALBUMS.replace("count: 2", "count: 3");
        let transport = MockTransport::default()
            .respond(5, "ManagementAlbums", &albums)
            .respond(100, "ManagementAlbumPictures", TRIP_ITEMS);
        let crawler = Crawler::new(transport, SITE);

        let err = crawler.crawl_site().await.unwrap_err();

        match err {
            SitesError::CountMismatch {
                album_node_id,
                expected,
                actual,
                ..
            } => {
                assert_eq!(album_node_id, 100);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected CountMismatch, got {:?}", other),
        }
        // Nothing after the failing album is requested
        assert!(crawler.transport().calls_for("ManagementPicture").is_empty());
        assert!(
            !crawler
                .transport()
                .calls()
                .iter()
                .any(|call| call.node_id == 24)
        );
    }

    #[tokio::test]
    async fn missing_album_listing_must_match_declared_count() {
        let transport = MockTransport::default().respond(5, "ManagementAlbums", TRIP_ALBUMS);
        let err = Crawler::new(transport, SITE).crawl_site().await.unwrap_err();
        assert!(matches!(
            err,
            SitesError::CountMismatch {
                expected: 2,
                actual: 0,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn uncommented_items_skip_the_detail_fetch() {
        let items = TRIP_ITEMS.replace("comments: 1", "comments: 0");
        let transport = helpers::trip_transport().respond(100, "ManagementAlbumPictures", &items);
        let crawler = Crawler::new(transport, SITE);

        let crawl = crawler.crawl_site().await.unwrap();

        assert!(crawler.transport().calls_for("ManagementPicture").is_empty());
        assert!(crawl.items.iter().all(|item| item.comments.is_empty()));
    }

    #[tokio::test]
    async fn commented_items_get_one_detail_fetch() {
        let crawler = Crawler::new(helpers::trip_transport(), SITE);
        let crawl = crawler.crawl_site().await.unwrap();

        let details = crawler.transport().calls_for("ManagementPicture");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].node_id, 102);
        assert_eq!(details[0].page, "familytrip/pictures");
        assert_eq!(crawl.items[1].comments, vec!["Nice!".to_string()]);
    }

    #[tokio::test]
    async fn comments_keep_server_order() {
        let detail = "{result: {section: {nodeType: 'shutterflyItem', nodeId: 102, \
                      commentList: [{text: 'zebra'}, {text: 'apple'}, {author: 'no text'}, {text: 'mango'}]}}}";
        let transport = helpers::trip_transport().respond(102, "ManagementPicture", detail);
        let crawl = Crawler::new(transport, SITE).crawl_site().await.unwrap();

        assert_eq!(crawl.items[1].comments, vec!["zebra", "apple", "", "mango"]);
    }

    #[tokio::test]
    async fn unusable_detail_leaves_comments_empty() {
        for detail in [
            "{error: 'gone'}",
            "{result: {section: {nodeType: 'albumGroup', commentList: [{text: 'x'}]}}}",
        ] {
            let transport = helpers::trip_transport().respond(102, "ManagementPicture", detail);
            let crawl = Crawler::new(transport, SITE).crawl_site().await.unwrap();
            assert_eq!(crawl.items.len(), 2);
            assert!(crawl.items[1].comments.is_empty());
        }
    }

    #[tokio::test]
    async fn detail_layout_is_configurable() {
        let transport = helpers::trip_transport().respond(102, "PictureDetail", helpers::SUNSET_DETAIL);
        let options = CrawlOptions {
            detail_layout: "PictureDetail".to_string(),
            ..CrawlOptions::default()
        };
        let crawler = Crawler::with_options(transport, SITE, options);
        let crawl = crawler.crawl_site().await.unwrap();

        assert!(crawler.transport().calls_for("ManagementPicture").is_empty());
        assert_eq!(crawl.items[1].comments, vec!["Nice!".to_string()]);
    }

    #[tokio::test]
    async fn wrongly_typed_album_is_skipped() {
        let albums = "{result: {section: {groups: [\
                      {nodeType: 'folder', title: 'Odd', count: 9, nodeId: 300},\
                      {nodeType: 'albumGroup', title: 'Trip', count: 2, nodeId: 100}]}}}";
        let transport = helpers::trip_transport().respond(5, "ManagementAlbums", albums);
        let crawler = Crawler::new(transport, SITE);

        let crawl = crawler.crawl_site().await.unwrap();

        assert_eq!(crawl.albums.len(), 1);
        assert_eq!(crawl.albums[0].title, "Trip");
        assert!(
            !crawler
                .transport()
                .calls()
                .iter()
                .any(|call| call.node_id == 300)
        );
    }

    #[tokio::test]
    async fn wrongly_typed_item_is_skipped_but_counted() {
        let items = TRIP_ITEMS.replace(
            "{nodeType: 'shutterflyItem', title: 'Beach'",
            "{nodeType: 'video', title: 'Beach'",
        );
        let transport = helpers::trip_transport().respond(100, "ManagementAlbumPictures", &items);
        let crawl = Crawler::new(transport, SITE).crawl_site().await.unwrap();

        assert_eq!(crawl.items.len(), 1);
        assert_eq!(crawl.items[0].title, "Sunset");
    }

    #[tokio::test]
    async fn every_item_is_attached_to_its_album() {
        let crawl = Crawler::new(helpers::trip_transport(), SITE)
            .crawl_site()
            .await
            .unwrap();

        for album in &crawl.albums {
            let attached = crawl
                .items
                .iter()
                .filter(|item| item.parent() == Some(album.node_id))
                .count() as u64;
            assert_eq!(attached, album.expected_item_count);
        }
        assert!(crawl.items.iter().all(|item| item.parent().is_some()));
    }

    #[tokio::test]
    async fn crawling_twice_gives_identical_output() {
        let first = export_bytes(helpers::trip_transport()).await;
        let second = export_bytes(helpers::trip_transport()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn decoded_responses_are_dumped() {
        let dump_dir = tempfile::tempdir().unwrap();
        let options = CrawlOptions {
            dump_dir: Some(dump_dir.path().join("raw")),
            ..CrawlOptions::default()
        };
        Crawler::with_options(helpers::trip_transport(), SITE, options)
            .crawl_site()
            .await
            .unwrap();

        let raw = dump_dir.path().join("raw");
        for name in [
            "ManagementAlbums-5.json",
            "ManagementAlbums-24.json",
            "ManagementAlbumPictures-100.json",
            "ManagementPicture-102.json",
        ] {
            assert!(raw.join(name).exists(), "missing {}", name);
        }
        let listing: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(raw.join("ManagementAlbums-5.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(listing["result"]["section"]["groups"][0]["title"], "Trip");
    }
}
