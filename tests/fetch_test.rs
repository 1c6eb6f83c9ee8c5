use std::time::Duration;

use url::Url;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use news_extract::{Error, Extractor, FetchError, FetchOptions, Fetcher, HttpFetcher, Options, SourceEngine};

fn article_page() -> String {
    let body = (0..60).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    format!(
        "<html><head><title>Served story</title></head><body><nav>Menu</nav>\
         <article><p>{body}</p></article></body></html>"
    )
}

fn fetch_options(timeout: Duration) -> FetchOptions {
    FetchOptions {
        timeout,
        ..FetchOptions::default()
    }
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).unwrap()
}

#[tokio::test]
async fn fetches_html_with_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_page(), "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
    let markup = fetcher.fetch(&url(&server, "/story")).await.unwrap();
    assert!(markup.contains("Served story"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
    let err = fetcher.fetch(&url(&server, "/missing")).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article_page(), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&fetch_options(Duration::from_millis(300))).unwrap();
    let err = fetcher.fetch(&url(&server, "/slow")).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn non_html_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
    let err = fetcher.fetch(&url(&server, "/report.pdf")).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidContentType(ref ct) if ct == "application/pdf"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huge"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_page(), "text/html"))
        .mount(&server)
        .await;

    let options = FetchOptions {
        max_content_size: 64,
        ..FetchOptions::default()
    };
    let fetcher = HttpFetcher::new(&options).unwrap();
    let err = fetcher.fetch(&url(&server, "/huge")).await.unwrap_err();
    assert!(matches!(err, FetchError::ContentTooLarge(n) if n > 64));
}

#[tokio::test]
async fn header_charset_is_used_for_decoding() {
    let server = MockServer::start().await;
    // "Привет" in windows-1251
    let body = b"<html><body><p>\xcf\xf0\xe8\xe2\xe5\xf2</p></body></html>".to_vec();
    Mock::given(method("GET"))
        .and(path("/ru"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=windows-1251"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
    let markup = fetcher.fetch(&url(&server, "/ru")).await.unwrap();
    assert!(markup.contains("Привет"));
}

#[tokio::test]
async fn extractor_fetches_and_extracts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_page(), "text/html"))
        .mount(&server)
        .await;

    let extractor = Extractor::new().unwrap();
    let article = extractor
        .extract_url(&format!("{}/story", server.uri()))
        .await
        .unwrap();
    assert_eq!(article.source_engine, SourceEngine::Primary);
    assert_eq!(article.word_count, 60);
    assert_eq!(article.metadata.title.as_deref(), Some("Served story"));
    assert!(!article.text.contains("Menu"));
}

#[tokio::test]
async fn extractor_surfaces_fetch_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let options = Options {
        fetch: fetch_options(Duration::from_secs(5)),
        ..Options::default()
    };
    let extractor = Extractor::builder().options(options).build().unwrap();
    let err = extractor
        .extract_url(&format!("{}/broken", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Status(500))));
    assert!(err.is_fetch_error());
}
