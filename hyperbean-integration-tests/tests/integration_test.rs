use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;

use hyperbean_client::session::PageSession;
use hyperbean_client::{Client, ClientConfig, SystemClock};
use hyperbean_common::{BeansPage, ErrorResponse, HyperbeanError, BEANS_PER_PAGE};
use hyperbean_server::{Server, ServerConfig};

const SERVER_READY_TIMEOUT: Duration = Duration::from_secs(60);

async fn start_server() -> Client {
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = Server::new(ServerConfig {
        address: "127.0.0.1:0".parse().unwrap(),
        bean_count: 72,
    });

    tokio::spawn(async move {
        server.run(ready_tx).await.expect("server failed");
    });

    let addr = timeout(SERVER_READY_TIMEOUT, ready_rx)
        .await
        .expect("server did not start within 60 seconds")
        .expect("server ready signal dropped");

    Client::new(ClientConfig { base_url: format!("http://{}", addr) })
}

/// Seed a session from the first page, the way the initial render would.
async fn start_session(client: &Client) -> PageSession {
    let initial = client.fetch_beans_page(1).await.expect("initial fetch failed");
    PageSession::new(initial.page.beans, initial.page.pagination, Arc::new(SystemClock))
}

// --- Listing ---

#[tokio::test]
async fn test_first_page_contents() {
    let client = start_server().await;

    let fetch = client.fetch_beans_page(1).await.expect("fetch failed");

    assert_eq!(fetch.page.beans.len(), 6);
    assert_eq!(fetch.page.pagination.current_page, 1);
    assert_eq!(fetch.page.pagination.total_pages, 12);
    assert_eq!(fetch.page.pagination.total_count, 72);
    assert_eq!(fetch.page.pagination.per_page, BEANS_PER_PAGE);
    assert!(!fetch.page.is_using_hyperdrive);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let client = start_server().await;

    let first = client.fetch_beans_page(1).await.expect("fetch failed");
    let second = client.fetch_beans_page(2).await.expect("fetch failed");

    let first_ids: Vec<u32> = first.page.beans.iter().map(|b| b.id).collect();
    let second_ids: Vec<u32> = second.page.beans.iter().map(|b| b.id).collect();
    assert_eq!(first_ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(second_ids, vec![7, 8, 9, 10, 11, 12]);
}

#[tokio::test]
async fn test_page_past_end_returns_empty_list() {
    let client = start_server().await;

    let fetch = client.fetch_beans_page(99).await.expect("fetch failed");

    assert!(fetch.page.beans.is_empty());
    assert_eq!(fetch.page.pagination.current_page, 99);
    assert_eq!(fetch.page.pagination.total_pages, 12);
}

#[tokio::test]
async fn test_hyperdrive_cookie_round_trip() {
    let client = start_server().await;

    let direct = client.fetch_beans_page(1).await.expect("fetch failed");
    assert!(!direct.page.is_using_hyperdrive);

    let mut client = client;
    client.set_hyperdrive(true);
    let accelerated = client.fetch_beans_page(1).await.expect("fetch failed");
    assert!(accelerated.page.is_using_hyperdrive);
}

// --- Raw query handling (via reqwest to control the query string) ---

#[tokio::test]
async fn test_negative_page_clamps_to_one() {
    let client = start_server().await;
    let http = reqwest::Client::new();

    let url = format!("{}/api/beans?page=-5", client.config.base_url);
    let page: BeansPage = http.get(&url).send().await.unwrap().json().await.unwrap();

    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.beans.len(), 6);
}

#[tokio::test]
async fn test_non_numeric_page_defaults_to_one() {
    let client = start_server().await;
    let http = reqwest::Client::new();

    let url = format!("{}/api/beans?page=abc", client.config.base_url);
    let page: BeansPage = http.get(&url).send().await.unwrap().json().await.unwrap();

    assert_eq!(page.pagination.current_page, 1);
}

#[tokio::test]
async fn test_invalid_bean_id_is_400_with_envelope() {
    let client = start_server().await;
    let http = reqwest::Client::new();

    let url = format!("{}/api/beans/abc", client.config.base_url);
    let response = http.get(&url).send().await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid bean ID");
}

// --- Detail ---

#[tokio::test]
async fn test_detail_matches_listing() {
    let client = start_server().await;

    let fetch = client.fetch_beans_page(1).await.expect("fetch failed");
    let listed = &fetch.page.beans[0];

    let detail = client.fetch_bean(listed.id).await.expect("detail fetch failed");

    assert_eq!(detail.bean, *listed);
    match (detail.bean.supplier_id, &detail.supplier) {
        (Some(sid), Some(supplier)) => assert_eq!(supplier.id, sid),
        (None, None) => {}
        (bean_sid, joined) => {
            panic!("supplier join mismatch: supplier_id {bean_sid:?}, joined {joined:?}")
        }
    }
}

#[tokio::test]
async fn test_detail_unknown_bean_is_not_found() {
    let client = start_server().await;

    let err = client.fetch_bean(9_999).await.unwrap_err();
    assert_eq!(err, HyperbeanError::BeanNotFound(9_999));
}

// --- Session over a live server ---

#[tokio::test]
async fn test_session_records_latency_per_mode() {
    let mut client = start_server().await;
    let mut session = start_session(&client).await;

    let changed = session.change_page(&client, 2).await.expect("page change failed");
    assert!(changed);
    assert_eq!(session.pagination().current_page, 2);

    client.set_hyperdrive(true);
    let changed = session.change_page(&client, 3).await.expect("page change failed");
    assert!(changed);

    let stats = session.stats();
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.direct_requests, 1);
    assert_eq!(stats.hyperdrive_requests, 1);
    assert!(stats.avg_direct_db.is_some());
    assert!(stats.avg_hyperdrive_db.is_some());
    assert!(stats.last_sample.unwrap().is_hyperdrive);
}

#[tokio::test]
async fn test_session_noop_and_out_of_range_changes() {
    let client = start_server().await;
    let mut session = start_session(&client).await;

    // Already on page 1; nothing is fetched or recorded.
    let changed = session.change_page(&client, 1).await.expect("no-op failed");
    assert!(!changed);

    let changed = session.change_page(&client, 13).await.expect("no-op failed");
    assert!(!changed);

    assert_eq!(session.stats().total_requests, 0);
    assert_eq!(session.pagination().current_page, 1);
}

#[tokio::test]
async fn test_session_page_window_over_live_pagination() {
    use hyperbean_client::pager::PageEntry::{Ellipsis, Page};

    let client = start_server().await;
    let mut session = start_session(&client).await;

    assert_eq!(session.page_window(), vec![Page(1), Page(2), Ellipsis, Page(12)]);

    session.change_page(&client, 6).await.expect("page change failed");
    assert_eq!(
        session.page_window(),
        vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
    );
}
