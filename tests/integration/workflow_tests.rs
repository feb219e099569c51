use crate::common::connected_client;
use futures::TryStreamExt;
use mockito::{Matcher, Server};
use preservica_client::application::interfaces::workflow::WorkflowService;
use preservica_client::error::AppError;
use preservica_client::model::paging::PageRequest;
use preservica_client::model::workflow::WorkflowQuery;

const INSTANCES_PATH: &str = "/sdb/rest/workflow/instances";

fn instances_xml(start: usize, count: usize, total: Option<usize>) -> String {
    let instances: String = (start..start + count)
        .map(|i| {
            format!(
                "<WorkflowInstance id=\"wf-{i}\"><WorkflowContextId>ctx-1</WorkflowContextId><State>Active</State><StartedDate>2026-01-0{}T10:00:00Z</StartedDate></WorkflowInstance>",
                i % 9 + 1
            )
        })
        .collect();
    let paging = total
        .map(|t| format!("<Paging><TotalResults>{t}</TotalResults></Paging>"))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><WorkflowInstancesResponse xmlns="http://workflow.preservica.com"><WorkflowInstances>{instances}</WorkflowInstances>{paging}</WorkflowInstancesResponse>"#
    )
}

fn window(start: usize, max: usize) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("state".into(), "Active".into()),
        Matcher::UrlEncoded("start".into(), start.to_string()),
        Matcher::UrlEncoded("max".into(), max.to_string()),
    ])
}

#[tokio::test]
async fn instances_walk_offset_pages_without_total() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 2).await;

    let mut pages = Vec::new();
    for (start, count) in [(0, 2), (2, 2), (4, 1)] {
        let mock = server
            .mock("GET", INSTANCES_PATH)
            .match_query(window(start, 2))
            .with_status(200)
            .with_body(instances_xml(start, count, None))
            .expect(1)
            .create_async()
            .await;
        pages.push(mock);
    }

    let query = WorkflowQuery::new().state("Active");
    let instances: Vec<_> = client.instances(&query).try_collect().await.unwrap();

    let ids: Vec<_> = instances.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["wf-0", "wf-1", "wf-2", "wf-3", "wf-4"]);
    assert_eq!(instances[0].context_id.as_deref(), Some("ctx-1"));
    for mock in pages {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn instances_stop_on_empty_page() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 2).await;
    let first = server
        .mock("GET", INSTANCES_PATH)
        .match_query(window(0, 2))
        .with_status(200)
        .with_body(instances_xml(0, 2, None))
        .expect(1)
        .create_async()
        .await;
    let empty = server
        .mock("GET", INSTANCES_PATH)
        .match_query(window(2, 2))
        .with_status(200)
        .with_body(instances_xml(0, 0, None))
        .expect(1)
        .create_async()
        .await;

    let query = WorkflowQuery::new().state("Active");
    let instances: Vec<_> = client.instances(&query).try_collect().await.unwrap();

    assert_eq!(instances.len(), 2);
    first.assert_async().await;
    empty.assert_async().await;
}

#[tokio::test]
async fn reported_total_sets_has_more() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 3).await;
    let _first = server
        .mock("GET", INSTANCES_PATH)
        .match_query(window(0, 3))
        .with_status(200)
        .with_body(instances_xml(0, 3, Some(4)))
        .create_async()
        .await;
    let _last = server
        .mock("GET", INSTANCES_PATH)
        .match_query(window(3, 3))
        .with_status(200)
        .with_body(instances_xml(3, 1, Some(4)))
        .create_async()
        .await;

    let query = WorkflowQuery::new().state("Active");
    let page = client
        .instances_page(&query, PageRequest::first(3))
        .await
        .unwrap();
    assert!(page.has_more());
    assert_eq!(page.total(), 4);
    assert_eq!(page.next_page(), Some("3"));

    let last = client
        .instances_page(&query, PageRequest::next(3, "3"))
        .await
        .unwrap();
    assert!(!last.has_more());
    assert_eq!(last.len(), 1);
}

#[tokio::test]
async fn single_instance_and_missing_instance() {
    let mut server = Server::new_async().await;
    let (client, _login) = connected_client(&mut server, 10).await;
    let _found = server
        .mock("GET", "/sdb/rest/workflow/instances/wf-7")
        .with_status(200)
        .with_body(instances_xml(7, 1, None))
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/sdb/rest/workflow/instances/wf-8")
        .with_status(404)
        .create_async()
        .await;

    let instance = client.workflow_instance("wf-7").await.unwrap();
    assert_eq!(instance.id, "wf-7");
    assert_eq!(instance.state.as_deref(), Some("Active"));

    match client.workflow_instance("wf-8").await {
        Err(AppError::NotFound { reference }) => assert_eq!(reference, "wf-8"),
        other => panic!("expected not found, got {other:?}"),
    }
}
