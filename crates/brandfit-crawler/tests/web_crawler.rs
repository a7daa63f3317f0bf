//! Integration tests for `WebCrawler` against a wiremock search engine and
//! site.

use brandfit_crawler::{TextFetcher, WebCrawler};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_crawler(base_url: &str) -> WebCrawler {
    WebCrawler::new(5, "brandfit-test/0.1", base_url, 0, 0).expect("crawler construction")
}

fn feed(links: &[String]) -> String {
    let items: String = links
        .iter()
        .map(|l| format!("<item><title>result</title><link>{l}</link></item>"))
        .collect();
    format!("<?xml version=\"1.0\"?><rss><channel><title>results</title>{items}</channel></rss>")
}

async fn mount_search(server: &MockServer, query: &str, links: &[String]) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .and(query_param("format", "rss"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(feed(links)),
        )
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn wikipedia_content_uses_first_wikipedia_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_search(
        &server,
        "Ann Lee wikipedia",
        &[
            format!("{base}/blog/ann"),
            format!("{base}/en.wikipedia.org/wiki/Ann_Lee"),
        ],
    )
    .await;
    mount_page(
        &server,
        "/en.wikipedia.org/wiki/Ann_Lee",
        200,
        "<html><body><script>x()</script><p>Ann Lee, climber.</p></body></html>",
    )
    .await;

    let text = test_crawler(&base).wikipedia_content("Ann Lee").await;
    assert_eq!(text, "Ann Lee climber.");
}

#[tokio::test]
async fn wikipedia_content_is_empty_without_wikipedia_result() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_search(&server, "Ann Lee wikipedia", &[format!("{base}/blog/ann")]).await;

    let text = test_crawler(&base).wikipedia_content("Ann Lee").await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn latest_updates_skips_wikipedia_and_failed_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_search(
        &server,
        "Ann Lee",
        &[
            format!("{base}/wikipedia.org/wiki/Ann_Lee"),
            format!("{base}/news/1"),
            format!("{base}/news/missing"),
            format!("{base}/news/2"),
            format!("{base}/news/3"),
            format!("{base}/news/4"),
        ],
    )
    .await;
    mount_page(&server, "/news/1", 200, "<p>First story</p>").await;
    mount_page(&server, "/news/missing", 404, "<p>Not found</p>").await;
    mount_page(&server, "/news/2", 200, "<p>Second story</p>").await;
    mount_page(&server, "/news/3", 200, "<p>Third story</p>").await;
    mount_page(&server, "/news/4", 200, "<p>Fourth story</p>").await;

    let text = test_crawler(&base).latest_updates("Ann Lee").await;
    assert_eq!(text, "First story\n\nSecond story\n\nThird story");
}

#[tokio::test]
async fn search_failure_yields_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let crawler = test_crawler(&server.uri());
    assert_eq!(crawler.wikipedia_content("Ann Lee").await, "");
    assert_eq!(crawler.latest_updates("Ann Lee").await, "");
}

#[tokio::test]
async fn search_retries_rate_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_search(&server, "Ann Lee", &[format!("{base}/news/1")]).await;

    let crawler = WebCrawler::new(5, "brandfit-test/0.1", &base, 2, 0).expect("crawler");
    let links = crawler.search("Ann Lee", 10).await.expect("search");
    assert_eq!(links, vec![format!("{base}/news/1")]);
}

#[tokio::test]
async fn search_does_not_retry_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = WebCrawler::new(5, "brandfit-test/0.1", &server.uri(), 3, 0).expect("crawler");
    let err = crawler.search("Ann Lee", 10).await.expect_err("404 is permanent");
    assert!(matches!(
        err,
        brandfit_crawler::CrawlerError::UnexpectedStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn fetch_page_text_returns_empty_on_non_200() {
    let server = MockServer::start().await;
    mount_page(&server, "/gone", 500, "<p>error page</p>").await;

    let text = test_crawler(&server.uri())
        .fetch_page_text(&format!("{}/gone", server.uri()))
        .await;
    assert_eq!(text, "");
}

#[test]
fn rejects_non_http_base_url() {
    assert!(WebCrawler::new(5, "ua", "ftp://example.com", 0, 0).is_err());
    assert!(WebCrawler::new(5, "ua", "not a url", 0, 0).is_err());
}
