//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small directory site and exercise
//! fetching, pagination and the full crawl end-to-end.

use advisor_harvest::config::{Config, FetcherConfig, OutputConfig, PaginationConfig, SiteConfig};
use advisor_harvest::crawler::{run_crawl, Coordinator, FetchResult, Fetcher, Paginator, StopReason};
use advisor_harvest::links::LinkClassifier;
use advisor_harvest::{HarvestError, NOT_AVAILABLE};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "financial-advisors";

fn fast_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        pacing_ms: 0,
        timeout_secs: 5,
        ..FetcherConfig::default()
    }
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            directory_path: "/financial-advisors.asp".to_string(),
            path_prefix: PREFIX.to_string(),
        },
        fetcher: fast_fetcher_config(),
        pagination: PaginationConfig::default(),
        output: OutputConfig {
            csv_path: csv_path.to_string(),
            summary_path: None,
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn listing_page(listing_ids: &[u32], has_next: bool) -> ResponseTemplate {
    let mut body = String::new();
    for id in listing_ids {
        body.push_str(&format!(
            r#"<a href="/financial-advisors/illinois/springfield/firm-{id}/{id}">Firm {id}</a>"#
        ));
    }
    body.push_str(r#"<a href="/financial-advisors/illinois">Back to Illinois</a>"#);
    if has_next {
        body.push_str(r#"<div class="pagination"><a href="?page=99">Next &raquo;</a></div>"#);
    } else {
        body.push_str(r#"<div class="pagination"><a href="?page=1">Previous</a></div>"#);
    }
    html(&body)
}

fn detail_page(company: &str, email: &str) -> ResponseTemplate {
    html(&format!(
        r#"<h1>{company}</h1>
        <div style="margin: 20px 0 20px 0">
            <div>123 Main St</div>
            <div>Suite 4</div>
            <div>Springfield, IL</div>
            <div>62704</div>
            <div>Tel: (217) 555-0100</div>
        </div>
        <a href="mailto:{email}">Email us</a>"#
    ))
}

async fn mount_listing_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield"))
        .and(query_param("page", page))
        .respond_with(response)
        .mount(server)
        .await;
}

fn sub_region_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/financial-advisors/illinois/springfield", server.uri())).unwrap()
}

fn classifier(server: &MockServer) -> LinkClassifier {
    LinkClassifier::new(Url::parse(&server.uri()).unwrap(), PREFIX)
}

#[tokio::test]
async fn test_fetcher_sends_identity_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "HarvestTest/1.0"))
        .and(header("accept-language", "en-GB"))
        .respond_with(html("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        user_agent: "HarvestTest/1.0".to_string(),
        accept_language: "en-GB".to_string(),
        ..fast_fetcher_config()
    };
    let mut fetcher = Fetcher::new(&config).unwrap();
    let url = Url::parse(&format!("{}/page", mock_server.uri())).unwrap();

    let result = fetcher.fetch(&url).await;
    assert!(result.is_success());
    assert_eq!(fetcher.requests_made(), 1);
    assert_eq!(fetcher.failures(), 0);
}

#[tokio::test]
async fn test_fetcher_reports_http_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();

    match fetcher.fetch(&url).await {
        FetchResult::HttpError { status_code } => assert_eq!(status_code, 404),
        other => panic!("expected HttpError, got {:?}", other),
    }
    assert_eq!(fetcher.failures(), 1);
}

#[tokio::test]
async fn test_pagination_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    mount_listing_page(&mock_server, "1", listing_page(&[1, 2], true)).await;
    // Page 2 repeats listing 2
    mount_listing_page(&mock_server, "2", listing_page(&[2, 3], true)).await;
    mount_listing_page(&mock_server, "3", listing_page(&[], true)).await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield"))
        .and(query_param("page", "4"))
        .respond_with(listing_page(&[4], false))
        .expect(0)
        .mount(&mock_server)
        .await;

    let classifier = classifier(&mock_server);
    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let pagination = Paginator::new(&classifier, None)
        .enumerate_listings(&mut fetcher, &sub_region_url(&mock_server))
        .await;

    let paths: Vec<&str> = pagination.listings.iter().map(|u| u.path()).collect();
    assert_eq!(
        paths,
        vec![
            "/financial-advisors/illinois/springfield/firm-1/1",
            "/financial-advisors/illinois/springfield/firm-2/2",
            "/financial-advisors/illinois/springfield/firm-3/3",
        ]
    );
    assert_eq!(pagination.pages_fetched, 3);
    assert_eq!(pagination.stop, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_listing_variants_collapse_to_one_detail_page() {
    let mock_server = MockServer::start().await;

    mount_listing_page(
        &mock_server,
        "1",
        html(
            r#"<a href="/financial-advisors/illinois/springfield/acme/101">Acme</a>
               <a href="/financial-advisors/illinois/springfield/acme/101#reviews">Reviews</a>
               <div class="pagination"><a href="?page=2">Next</a></div>"#,
        ),
    )
    .await;
    mount_listing_page(
        &mock_server,
        "2",
        html(r#"<a href="/financial-advisors/illinois/springfield/acme/101?tab=contact">Contact</a>"#),
    )
    .await;

    let classifier = classifier(&mock_server);
    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let pagination = Paginator::new(&classifier, None)
        .enumerate_listings(&mut fetcher, &sub_region_url(&mock_server))
        .await;

    assert_eq!(pagination.listings.len(), 1);
    assert_eq!(
        pagination.listings[0].path(),
        "/financial-advisors/illinois/springfield/acme/101"
    );
    assert_eq!(pagination.listings[0].query(), None);
    assert_eq!(pagination.stop, StopReason::NoNextControl);
}

#[tokio::test]
async fn test_pagination_stops_without_next_control() {
    let mock_server = MockServer::start().await;

    mount_listing_page(&mock_server, "1", listing_page(&[7], false)).await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield"))
        .and(query_param("page", "2"))
        .respond_with(listing_page(&[8], false))
        .expect(0)
        .mount(&mock_server)
        .await;

    let classifier = classifier(&mock_server);
    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let pagination = Paginator::new(&classifier, None)
        .enumerate_listings(&mut fetcher, &sub_region_url(&mock_server))
        .await;

    assert_eq!(pagination.listings.len(), 1);
    assert_eq!(pagination.pages_fetched, 1);
    assert_eq!(pagination.stop, StopReason::NoNextControl);
}

#[tokio::test]
async fn test_pagination_keeps_partial_result_on_fetch_failure() {
    let mock_server = MockServer::start().await;

    mount_listing_page(&mock_server, "1", listing_page(&[1, 2], true)).await;
    mount_listing_page(&mock_server, "2", ResponseTemplate::new(500)).await;

    let classifier = classifier(&mock_server);
    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let pagination = Paginator::new(&classifier, None)
        .enumerate_listings(&mut fetcher, &sub_region_url(&mock_server))
        .await;

    assert_eq!(pagination.listings.len(), 2);
    assert_eq!(pagination.stop, StopReason::FetchFailed);
}

#[tokio::test]
async fn test_pagination_respects_max_pages() {
    let mock_server = MockServer::start().await;

    mount_listing_page(&mock_server, "1", listing_page(&[1], true)).await;
    mount_listing_page(&mock_server, "2", listing_page(&[2], true)).await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield"))
        .and(query_param("page", "3"))
        .respond_with(listing_page(&[3], true))
        .expect(0)
        .mount(&mock_server)
        .await;

    let classifier = classifier(&mock_server);
    let mut fetcher = Fetcher::new(&fast_fetcher_config()).unwrap();
    let pagination = Paginator::new(&classifier, Some(2))
        .enumerate_listings(&mut fetcher, &sub_region_url(&mock_server))
        .await;

    assert_eq!(pagination.listings.len(), 2);
    assert_eq!(pagination.pages_fetched, 2);
    assert_eq!(pagination.stop, StopReason::PageLimit);
}

/// Mounts a one-region, one-city directory with two listings on page 1
async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/financial-advisors.asp"))
        .respond_with(html(
            r#"<a href="/about">About</a>
               <a href="/financial-advisors/illinois">Illinois</a>
               <a href="/financial-advisors/all-states">All States</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois"))
        .respond_with(html(
            r#"<a href="/financial-advisors/illinois/springfield">Springfield</a>
               <a href="/financial-advisors/ohio/akron">Akron</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors/ohio/akron"))
        .respond_with(listing_page(&[50], false))
        .expect(0)
        .mount(server)
        .await;

    mount_listing_page(server, "1", listing_page(&[1, 2], true)).await;
    mount_listing_page(server, "2", listing_page(&[], false)).await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield/firm-1/1"))
        .respond_with(detail_page("First Capital", "jane@advisors.com"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield/firm-2/2"))
        .respond_with(html("<p>Profile temporarily unavailable</p>"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("advisors.csv");
    let config = create_test_config(&mock_server.uri(), csv_path.to_str().unwrap());

    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.records.len(), 2);

    let first = &outcome.records[0];
    assert_eq!(first.company.as_deref(), Some("First Capital"));
    assert_eq!(first.city.as_deref(), Some("Springfield"));
    assert_eq!(first.state.as_deref(), Some("IL"));
    assert_eq!(first.zip.as_deref(), Some("62704"));
    assert_eq!(first.phone.as_deref(), Some("(217) 555-0100"));
    assert_eq!(first.email.as_deref(), Some("jane@advisors.com"));

    // The second profile has no contact block: every field is unavailable
    assert_eq!(outcome.records[1].missing_fields(), 10);

    assert_eq!(outcome.stats.regions, 1);
    assert_eq!(outcome.stats.regions_rejected, 1);
    assert_eq!(outcome.stats.sub_regions, 1);
    assert_eq!(outcome.stats.listing_pages, 2);
    assert_eq!(outcome.stats.listings, 2);
    assert_eq!(outcome.stats.records, 2);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "First Capital");
    assert_eq!(&rows[1][0], NOT_AVAILABLE);
}

#[tokio::test]
async fn test_failed_detail_page_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors.asp"))
        .respond_with(html(r#"<a href="/financial-advisors/illinois">Illinois</a>"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois"))
        .respond_with(html(
            r#"<a href="/financial-advisors/illinois/springfield">Springfield</a>"#,
        ))
        .mount(&mock_server)
        .await;
    mount_listing_page(&mock_server, "1", listing_page(&[1, 2], false)).await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield/firm-1/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield/firm-2/2"))
        .respond_with(detail_page("Second Street Advisors", "team@second.com"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("advisors.csv");
    let config = create_test_config(&mock_server.uri(), csv_path.to_str().unwrap());

    let mut coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run().await.unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].company.as_deref(), Some("Second Street Advisors"));
    assert_eq!(outcome.stats.listings, 2);
    assert_eq!(outcome.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_region_without_sub_regions_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors.asp"))
        .respond_with(html(
            r#"<a href="/financial-advisors/alaska">Alaska</a>
               <a href="/financial-advisors/illinois">Illinois</a>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/alaska"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois"))
        .respond_with(html(
            r#"<a href="/financial-advisors/illinois/springfield">Springfield</a>"#,
        ))
        .mount(&mock_server)
        .await;
    mount_listing_page(&mock_server, "1", listing_page(&[1], false)).await;
    Mock::given(method("GET"))
        .and(path("/financial-advisors/illinois/springfield/firm-1/1"))
        .respond_with(detail_page("Prairie Planning", "hello@prairie.com"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.csv");
    let mut coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run().await.unwrap();

    assert_eq!(outcome.stats.regions, 2);
    assert_eq!(outcome.stats.empty_regions, 1);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].email.as_deref(), Some("hello@prairie.com"));
}

#[tokio::test]
async fn test_no_regions_is_fatal_and_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/financial-advisors.asp"))
        .respond_with(html(r#"<a href="/financial-advisors/atlantis">Atlantis</a>"#))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("advisors.csv");
    let config = create_test_config(&mock_server.uri(), csv_path.to_str().unwrap());

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(HarvestError::NoRegions { .. })));
    assert!(!csv_path.exists());
}
