//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock catalog sites and test
//! the full discover / extract / write cycle end-to-end.

use catalog_harvest::config::{
    Config, CrawlerConfig, ExtractionConfig, OutputConfig, OutputFormat, UserAgentConfig,
};
use catalog_harvest::crawler::{harvest, Coordinator};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration starting from the given listing URL
fn create_test_config(start_url: String, output_path: &std::path::Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_urls: vec![start_url],
            min_delay_ms: 0, // No pacing for tests
            max_delay_ms: None,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            agents: vec!["Mozilla/5.0 (TestBrowser)".to_string()],
            accept_language: "pt-BR,pt;q=0.9".to_string(),
        },
        output: OutputConfig {
            format: OutputFormat::Json,
            path: Some(output_path.to_string_lossy().into_owned()),
            download_images: false,
            images_dir: "images".to_string(),
        },
        extraction: ExtractionConfig::default(),
    }
}

/// Listing page markup with product cards and an optional next link
fn listing_html(products: &[String], next: Option<String>) -> String {
    let mut html = String::from("<html><body><ul class=\"products\">");
    for product in products {
        html.push_str(&format!(
            r#"<li class="product"><a class="woocommerce-LoopProduct-link" href="{}">produto</a></li>"#,
            product
        ));
    }
    html.push_str("</ul>");
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<nav><a class="next page-numbers" href="{}">→</a></nav>"#,
            next
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Product page markup
fn product_html(title: &str, sku: &str, image: Option<String>) -> String {
    let gallery = image
        .map(|src| format!(r#"<div class="woocommerce-product-gallery"><img src="{}"></div>"#, src))
        .unwrap_or_default();
    format!(
        r#"<html><body>
        {gallery}
        <h1 class="product_title">{title}</h1>
        <div class="woocommerce-product-details__short-description"><p>Resumo de {title}.</p></div>
        <div class="product_meta">
            <span class="sku">{sku}</span>
            <span class="posted_in">Categorias: <a href="/c/1">Suprimentos</a>, <a href="/c/2">Lonas</a></span>
            <span class="brand">Marca: <a href="/m/1">Acme</a></span>
        </div>
        <div id="tab-description">
            <p>Descrição completa.</p>
            <h3>Vantagens</h3>
            <ul><li>Resistente</li><li>Durável</li></ul>
            <p><strong>Informações Técnicas:</strong><br>Cor: Branco<br>Largura: 3,20m</p>
        </div>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discovery_across_paginated_listings_with_cycle() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp = TempDir::new().unwrap();

    let alpha = format!("{}/produto/alpha/", base_url);
    let beta = format!("{}/produto/beta/", base_url);
    let gamma = format!("{}/produto/gamma/", base_url);

    // Page 2 links back to page 1, closing a pagination cycle
    mount_page(
        &mock_server,
        "/categoria/",
        listing_html(
            &[beta.clone(), alpha.clone()],
            Some(format!("{}/categoria/page/2/", base_url)),
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/categoria/page/2/",
        listing_html(
            &[beta.clone(), gamma.clone()],
            Some(format!("{}/categoria/", base_url)),
        ),
        1,
    )
    .await;

    let config = create_test_config(
        format!("{}/categoria/", base_url),
        &temp.path().join("products.json"),
    );
    let mut coordinator = Coordinator::new(config).unwrap();
    let (urls, stats) = coordinator.discover().await.unwrap();

    let urls: Vec<String> = urls.into_iter().map(String::from).collect();
    assert_eq!(urls, vec![alpha, beta, gamma]);
    assert_eq!(stats.listing_pages_fetched, 2);
    assert_eq!(stats.listing_pages_failed, 0);
}

#[tokio::test]
async fn test_full_harvest_writes_json_with_placeholder() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("products.json");

    let alpha = format!("{}/produto/alpha/", base_url);
    let missing = format!("{}/produto/missing/", base_url);

    mount_page(
        &mock_server,
        "/categoria/",
        listing_html(&[alpha.clone(), missing.clone()], None),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/produto/alpha/",
        product_html("Lona Alpha", "LA-1", None),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/produto/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/categoria/", base_url), &output_path);
    let summary = harvest(config).await.unwrap();

    assert_eq!(summary.output_path, output_path);
    assert_eq!(summary.statistics.products_extracted, 1);
    assert_eq!(summary.statistics.products_unreachable, 1);

    let text = std::fs::read_to_string(&output_path).unwrap();
    assert!(text.contains("Descrição completa."));

    let records: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);

    let record = &records[0];
    assert_eq!(record["url"], alpha);
    assert_eq!(record["title"], "Lona Alpha");
    assert_eq!(record["sku"], "LA-1");
    assert_eq!(record["categories"], serde_json::json!(["Suprimentos", "Lonas"]));
    assert_eq!(record["brand"], serde_json::json!(["Acme"]));
    assert_eq!(record["advantages"], serde_json::json!(["Resistente", "Durável"]));
    assert_eq!(record["technical_info"]["Cor"], "Branco");
    assert_eq!(record["technical_info"]["Largura"], "3,20m");

    let placeholder = &records[1];
    assert_eq!(placeholder["url"], missing);
    assert!(placeholder["title"].is_null());
    assert_eq!(placeholder["sku"], "");
    assert_eq!(placeholder["categories"], serde_json::json!([]));
}

#[tokio::test]
async fn test_full_harvest_writes_csv_with_images() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("products.csv");
    let images_dir = temp.path().join("imagens");

    let alpha = format!("{}/produto/alpha/", base_url);

    mount_page(&mock_server, "/categoria/", listing_html(&[alpha.clone()], None), 1).await;
    mount_page(
        &mock_server,
        "/produto/alpha/",
        product_html(
            "Lona Alpha",
            "LA-1",
            Some(format!("{}/uploads/lona-alpha.jpg", base_url)),
        ),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/uploads/lona-alpha.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(format!("{}/categoria/", base_url), &output_path);
    config.output.format = OutputFormat::Csv;
    config.output.download_images = true;
    config.output.images_dir = images_dir.to_string_lossy().into_owned();

    let summary = harvest(config).await.unwrap();
    assert_eq!(summary.statistics.images_downloaded, 1);

    let saved = images_dir.join("lona-alpha").join("lona-alpha.jpg");
    assert_eq!(std::fs::read(&saved).unwrap(), b"jpeg");

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["name", "SKU", "category", "brand", "description", "images", "url"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], "Lona Alpha");
    assert_eq!(&row[1], "LA-1");
    assert_eq!(&row[2], "Suprimentos > Lonas");
    assert_eq!(&row[3], "Acme");
    assert!(row[4].starts_with("Resumo de Lona Alpha. | "));
    assert_eq!(&row[5], "imagens/lona-alpha/lona-alpha.jpg");
    assert_eq!(&row[6], alpha.as_str());
}

#[tokio::test]
async fn test_unreachable_start_page_yields_empty_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("products.json");

    Mock::given(method("GET"))
        .and(path("/categoria/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/categoria/", base_url), &output_path);
    let summary = harvest(config).await.unwrap();

    assert_eq!(summary.statistics.listing_pages_failed, 1);
    assert_eq!(summary.statistics.products_discovered, 0);

    let records: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(records, serde_json::json!([]));
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp = TempDir::new().unwrap();

    mount_page(&mock_server, "/categoria/", listing_html(&[], None), 1).await;

    // The output path is an existing directory
    let config = create_test_config(format!("{}/categoria/", base_url), temp.path());
    assert!(harvest(config).await.is_err());
}
