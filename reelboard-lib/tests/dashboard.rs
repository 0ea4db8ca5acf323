//! Fetch, display and poll against a running API.

mod common;

use std::time::Duration;

use common::MockApi;
use common::MockResponse;
use reelboard_lib::DashboardClient;
use reelboard_lib::api::RetryConfig;
use reelboard_lib::auth::StaticTokenSource;
use reelboard_lib::model::Resource;
use reelboard_lib::poll::MetricsPoller;
use reelboard_lib::table::Column;
use reelboard_lib::table::DataTable;
use reelboard_lib::table::EventOutcome;
use reelboard_lib::table::TableEvent;
use reelboard_lib::table::render_text;
use serde_json::json;

fn client(mock: &MockApi) -> DashboardClient {
    DashboardClient::builder()
        .url(mock.url())
        .auth(StaticTokenSource::new("t"))
        .retry(RetryConfig::no_retry())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetched_films_in_table() {
    let mock = MockApi::start().await;
    mock.on(
        "GET",
        "/film/all",
        MockResponse::double_wrapped(json!([
            { "_id": "f1", "title": "Heat", "views": 80 },
            { "_id": "f2", "title": "Alien", "views": 120 },
            { "_id": "f3", "title": "Brazil", "views": null }
        ])),
    );

    let data = client(&mock).list_records(Resource::Films).await.unwrap();

    let mut table = DataTable::new(
        vec![
            Column::new("title", "Title").sortable(),
            Column::new("views", "Views").sortable(),
        ],
        Resource::Films.key_field(),
    )
    .unwrap()
    .with_page_size(2);

    assert_eq!(
        table.handle(TableEvent::HeaderClick("views".into()), &data),
        EventOutcome::Changed
    );
    let view = table.view(&data);
    let keys: Vec<_> = view
        .page_rows()
        .iter()
        .map(|r| r.get_string("id").unwrap().unwrap_or_default())
        .collect();
    assert_eq!(keys, ["f1", "f2"]);
    assert_eq!(view.total_pages(), 2);

    table.handle(TableEvent::NextPage, &data);
    let rendered = table.render(&data);
    assert_eq!(rendered.rows()[0].key, "f3");
    assert_eq!(rendered.rows()[0].cells, ["Brazil", ""]);

    table.handle(TableEvent::Search("ali".into()), &data);
    let text = render_text(&table.render(&data));
    assert!(text.contains("Alien"));
    assert!(!text.contains("Heat"));
    assert!(text.contains("Showing 1–1 of 1"));
}

#[tokio::test]
async fn test_poller_publishes_metrics_and_failures() {
    let mock = MockApi::start().await;
    mock.on("GET", "/admin/metrics", MockResponse::json(200, json!({ "totalFilms": 3 })));
    mock.on("GET", "/admin/metrics", MockResponse::json(503, json!({ "message": "busy" })));
    mock.on("GET", "/admin/metrics", MockResponse::json(200, json!({ "totalFilms": 4 })));

    let mut handle = MetricsPoller::spawn(client(&mock), Duration::from_millis(200));

    let mut films = Vec::new();
    let mut failures = 0;
    while films.len() < 2 {
        let update = tokio::time::timeout(Duration::from_secs(5), handle.changed())
            .await
            .unwrap()
            .unwrap();
        match update.metrics() {
            Some(metrics) => films.push(metrics.total_films),
            None => failures += 1,
        }
    }
    handle.shutdown().await;

    assert_eq!(films[0], 3);
    assert_eq!(*films.last().unwrap(), 4);
    assert!(failures <= 1);
}
