use crate::common::connected_client;
use futures::TryStreamExt;
use mockito::{Matcher, Server};
use preservica_client::application::interfaces::content::ContentService;
use preservica_client::error::AppError;
use preservica_client::model::content::{SearchQuery, ThumbnailSize};
use preservica_client::model::entity::EntityType;
use preservica_client::model::paging::PageRequest;
use serde_json::json;
use std::io::Write;

fn search_body(start: usize, count: usize, total: usize) -> String {
    let ids: Vec<String> = (start..start + count).map(|i| format!("sdb:IO|hit-{i}")).collect();
    let metadata: Vec<_> = (start..start + count)
        .map(|i| vec![json!({"name": "xip.title", "value": format!("Title {i}")})])
        .collect();
    json!({
        "success": true,
        "value": {"totalHits": total, "objectIds": ids, "metadata": metadata}
    })
    .to_string()
}

#[tokio::test]
async fn search_pages_by_offset() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 2).await;

    let mut pages = Vec::new();
    for (start, count) in [(0, 2), (2, 2), (4, 1)] {
        let mock = server
            .mock("POST", "/api/content/search")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start".into(), start.to_string()),
                Matcher::UrlEncoded("max".into(), "2".into()),
                Matcher::UrlEncoded("metadata".into(), "xip.title".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_body(start, count, 5))
            .expect(1)
            .create_async()
            .await;
        pages.push(mock);
    }

    let query = SearchQuery::new("charter").with_metadata("xip.title");
    let hits: Vec<_> = client.search(&query).try_collect().await.unwrap();

    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].reference, "hit-0");
    assert_eq!(hits[4].entity_type, EntityType::Asset);
    assert_eq!(hits[3].metadata["xip.title"], json!("Title 3"));
    for mock in pages {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn last_search_page_has_no_cursor() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let _search = server
        .mock("POST", "/api/content/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(0, 3, 3))
        .create_async()
        .await;

    let query = SearchQuery::new("*");
    let page = client.search_page(&query, PageRequest::first(10)).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page.total(), 3);
    assert!(!page.has_more());

    let bad = client
        .search_page(&query, PageRequest::next(10, "not-a-number"))
        .await;
    assert!(matches!(bad, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn thumbnail_returns_image_bytes() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let thumbnail = server
        .mock("GET", "/api/content/thumbnail")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "sdb:IO|asset-1".into()),
            Matcher::UrlEncoded("size".into(), "large".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(vec![0x89, b'P', b'N', b'G'])
        .create_async()
        .await;

    let bytes = client
        .thumbnail(EntityType::Asset, "asset-1", ThumbnailSize::Large)
        .await
        .unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    thumbnail.assert_async().await;
}

#[tokio::test]
async fn download_streams_into_file() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let payload = "x".repeat(64 * 1024);
    let _download = server
        .mock("GET", "/api/content/download")
        .match_query(Matcher::UrlEncoded("id".into(), "sdb:CO|co-1".into()))
        .with_status(200)
        .with_body(payload.clone())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("co-1.bin");
    let written = client
        .download(EntityType::ContentObject, "co-1", &path)
        .await
        .unwrap();

    assert_eq!(written, payload.len() as u64);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), payload);
}

#[tokio::test]
async fn missing_download_is_not_found() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let _download = server
        .mock("GET", "/api/content/download")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = client
        .download(EntityType::Asset, "gone", &dir.path().join("gone.bin"))
        .await;
    match result {
        Err(AppError::NotFound { reference }) => assert_eq!(reference, "gone"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn interrupted_download_leaves_no_file() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let _download = server
        .mock("GET", "/api/content/download")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(|writer| {
            writer.write_all(&[b'x'; 70_000])?;
            Err(std::io::Error::other("connection dropped"))
        })
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("co-2.bin");
    let result = client
        .download(EntityType::ContentObject, "co-2", &path)
        .await;

    assert!(result.is_err());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
