//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the device site and exercise the
//! full listing -> detail pages -> output cycle end-to-end.

use gsmarena_scraper::config::Config;
use gsmarena_scraper::crawler::{run_crawl, Coordinator};
use gsmarena_scraper::{CodeSource, ScraperError};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, json_path: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", base_url);
    config.listing.url = Some(format!("{}/results.php3?nYearMin=2025", base_url));
    config.crawler.request_delay_ms = 0;
    config.client.timeout_secs = 5;
    config.output.json_path = json_path.display().to_string();
    config
}

fn listing_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}"><strong>Phone</strong></a></li>"#, href))
        .collect();
    format!(
        r#"<html><head><title>Phone finder results - GSMArena.com</title></head><body>
        <div class="general-menu"><a href="/samsung-phones-9.php">Samsung</a></div>
        <div class="makers"><ul>{}</ul></div>
        </body></html>"#,
        items
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

/// Mobile identity without commas, so the header matcher compares it whole
const TEST_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1 like Mac OS X) Mobile/15E148 Safari/604.1";

const SPEC_FIELD_PAGE: &str = r#"<html><head><title>Samsung Galaxy S21 - Full phone specifications - GSMArena.com</title></head>
<body><table>
<tr><th>Misc</th><td class="ttl">Models</td><td class="nfo" data-spec="models">SM-G991B, SM-G991U</td></tr>
</table></body></html>"#;

const ALSO_KNOWN_AS_PAGE: &str = r#"<html><head><title>Motorola Edge 2025 - Full phone specifications</title></head>
<body><table>
<tr><td class="ttl">Also known as</td><td class="nfo">Motorola XT2505</td></tr>
</table></body></html>"#;

const BARE_PAGE: &str = r#"<html><head><title>Nothing Phone (3) - Full phone specifications</title></head>
<body><p>Glyph matrix on the back.</p></body></html>"#;

#[tokio::test]
async fn test_full_crawl_writes_records_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/results.php3",
        listing_page(&[
            "samsung_galaxy_s21-10625.php",
            "/motorola_edge_2025-13744.php",
            "samsung_galaxy_s21-10625.php",
            "nothing_phone_3-13894.php",
        ]),
    )
    .await;
    mount_page(&mock_server, "/samsung_galaxy_s21-10625.php", SPEC_FIELD_PAGE.to_string()).await;
    mount_page(&mock_server, "/motorola_edge_2025-13744.php", ALSO_KNOWN_AS_PAGE.to_string()).await;
    mount_page(&mock_server, "/nothing_phone_3-13894.php", BARE_PAGE.to_string()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let config = create_test_config(&base_url, &json_path);

    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.discovered, 3);
    assert!(report.failed.is_empty());
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.unvisited, 0);

    let samsung = &report.records[0];
    assert_eq!(samsung.source_url, format!("{}/samsung_galaxy_s21-10625.php", base_url));
    assert_eq!(samsung.brand, "Samsung");
    assert_eq!(samsung.model_name, "Galaxy S21");
    assert_eq!(samsung.model_code, "SM-G991B");
    assert_eq!(samsung.misc_model_code, "SM-G991B");
    assert_eq!(samsung.code_source, Some(CodeSource::SpecField));

    let motorola = &report.records[1];
    assert_eq!(motorola.source_url, format!("{}/motorola_edge_2025-13744.php", base_url));
    assert_eq!(motorola.model_code, "Motorola XT2505");
    assert_eq!(motorola.misc_model_code, "");

    let nothing = &report.records[2];
    assert_eq!(nothing.brand, "Nothing");
    assert_eq!(nothing.model_name, "Phone (3)");
    assert_eq!(nothing.model_code, "GSM-13894");
    assert_eq!(nothing.code_source, Some(CodeSource::UrlInference));

    // Verify the dump
    let content = std::fs::read_to_string(&json_path).expect("Dump not written");
    let dump: serde_json::Value = serde_json::from_str(&content).expect("Dump is not JSON");
    let devices = dump.as_array().expect("Dump is not an array");
    assert_eq!(devices.len(), 3);
    assert_eq!(devices[0]["serial_code"], "SM-G991B");
    assert_eq!(devices[0]["misc_model"], "SM-G991B");
    assert_eq!(devices[1]["model"], "Edge 2025");
    assert_eq!(devices[2]["serial_code"], "GSM-13894");
    assert_eq!(devices[2]["misc_model"], "");
}

#[tokio::test]
async fn test_failed_detail_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/results.php3",
        listing_page(&[
            "samsung_galaxy_s21-10625.php",
            "apple_iphone_17-14085.php",
            "nothing_phone_3-13894.php",
        ]),
    )
    .await;
    mount_page(&mock_server, "/samsung_galaxy_s21-10625.php", SPEC_FIELD_PAGE.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/apple_iphone_17-14085.php"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/nothing_phone_3-13894.php", BARE_PAGE.to_string()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let config = create_test_config(&base_url, &json_path);

    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.discovered, 3);
    assert_eq!(report.records.len(), report.discovered - 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(
        report.failed[0].url,
        format!("{}/apple_iphone_17-14085.php", base_url)
    );
    assert_eq!(report.failed[0].reason, "HTTP 404");
    assert!(report
        .records
        .iter()
        .all(|r| !r.source_url.contains("apple_iphone_17")));

    let content = std::fs::read_to_string(&json_path).expect("Dump not written");
    let dump: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(dump.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_listing_failure_aborts_without_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/results.php3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let config = create_test_config(&base_url, &json_path);

    let result = run_crawl(config).await;

    match result {
        Err(ScraperError::ListingUnavailable { reason, .. }) => assert_eq!(reason, "HTTP 500"),
        other => panic!("Expected ListingUnavailable, got {:?}", other.map(|r| r.records)),
    }
    assert!(!json_path.exists());
}

#[tokio::test]
async fn test_empty_listing_writes_empty_dump() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/results.php3", listing_page(&[])).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let config = create_test_config(&base_url, &json_path);

    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.discovered, 0);
    assert!(report.records.is_empty());
    assert_eq!(std::fs::read_to_string(&json_path).unwrap(), "[]");
}

#[tokio::test]
async fn test_device_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/results.php3",
        listing_page(&[
            "samsung_galaxy_s21-10625.php",
            "motorola_edge_2025-13744.php",
            "nothing_phone_3-13894.php",
        ]),
    )
    .await;
    mount_page(&mock_server, "/samsung_galaxy_s21-10625.php", SPEC_FIELD_PAGE.to_string()).await;
    mount_page(&mock_server, "/motorola_edge_2025-13744.php", ALSO_KNOWN_AS_PAGE.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/nothing_phone_3-13894.php"))
        .respond_with(html_response(BARE_PAGE.to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let mut config = create_test_config(&base_url, &json_path);
    config.crawler.max_devices = Some(2);

    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.discovered, 3);
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_mobile_user_agent_and_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/results.php3"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/results-moved.php3", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results-moved.php3"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(html_response(listing_page(&["nothing_phone_3-13894.php"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nothing_phone_3-13894.php"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(html_response(BARE_PAGE.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let mut config = create_test_config(&base_url, &json_path);
    config.client.user_agent = TEST_USER_AGENT.to_string();
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].model_code, "GSM-13894");
    // Coordinator::run alone does not write output
    assert!(!json_path.exists());
}

#[tokio::test]
async fn test_run_ceiling() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/results.php3"))
        .respond_with(
            html_response(listing_page(&[])).set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let mut config = create_test_config(&base_url, &json_path);
    config.crawler.max_run_secs = 1;

    let result = run_crawl(config).await;

    assert!(matches!(result, Err(ScraperError::RunTimeout { secs: 1 })));
    assert!(!json_path.exists());
}

#[tokio::test]
async fn test_run_ceiling_keeps_visited_devices() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/results.php3",
        listing_page(&[
            "samsung_galaxy_s21-10625.php",
            "motorola_edge_2025-13744.php",
            "nothing_phone_3-13894.php",
        ]),
    )
    .await;
    mount_page(&mock_server, "/samsung_galaxy_s21-10625.php", SPEC_FIELD_PAGE.to_string()).await;
    mount_page(&mock_server, "/motorola_edge_2025-13744.php", ALSO_KNOWN_AS_PAGE.to_string()).await;
    mount_page(&mock_server, "/nothing_phone_3-13894.php", BARE_PAGE.to_string()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("device.json");
    let mut config = create_test_config(&base_url, &json_path);
    config.crawler.request_delay_ms = 1500;
    config.crawler.max_run_secs = 1;

    let report = run_crawl(config).await.expect("Crawl failed");

    // The first pause already outlasts the ceiling
    assert_eq!(report.discovered, 3);
    assert_eq!(report.records.len(), 1);
    assert!(report.failed.is_empty());
    assert_eq!(report.unvisited, 2);
    assert_eq!(report.records[0].model_code, "SM-G991B");

    let content = std::fs::read_to_string(&json_path).expect("Dump not written");
    let dump: serde_json::Value = serde_json::from_str(&content).expect("Dump is not JSON");
    let devices = dump.as_array().expect("Dump is not an array");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["serial_code"], "SM-G991B");

    let requests = mock_server.received_requests().await.expect("Recording disabled");
    assert!(!requests
        .iter()
        .any(|request| request.url.path() == "/motorola_edge_2025-13744.php"));
}
