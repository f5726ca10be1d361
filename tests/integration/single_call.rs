//! Integration tests for single (non-batched) calls

use crate::integration::mock_server::{article_json, frontpage_dml, MockServerFixture};
use diffbot_rust::{Error, Extracted, PageType};
use mockito::Matcher;
use std::time::Duration;

#[tokio::test]
async fn test_article_execute() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();

    let mock = fixture
        .server
        .mock("GET", "/v2/article")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("url".into(), "http://a.example/post".into()),
            Matcher::UrlEncoded("fields".into(), "meta,tags".into()),
            Matcher::UrlEncoded("timeout".into(), "15000".into()),
            Matcher::UrlEncoded("token".into(), "test-token".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(article_json("http://a.example/post", "Post"))
        .create_async()
        .await;

    let article = client
        .article("http://a.example/post")
        .fields("meta,tags")
        .timeout(Duration::from_secs(15))
        .execute()
        .await
        .unwrap();
    assert_eq!(article.title.as_deref(), Some("Post"));
    assert_eq!(article.page_type(), PageType::Article);
    assert_eq!(client.queue_len(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_frontpage_execute_reads_dml() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let page = "http://news.example.com/";

    let _mock = fixture
        .mock_get("/api/frontpage", 200, "text/xml;charset=UTF-8", &frontpage_dml(page))
        .await;

    let frontpage = client.frontpage(page).execute().await.unwrap();
    assert_eq!(frontpage.url(), Some(page));
    assert_eq!(frontpage.items[0].id, Some(7));
}

#[tokio::test]
async fn test_frontpage_error_envelope() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();

    let _mock = fixture
        .mock_get(
            "/api/frontpage",
            200,
            "application/json",
            r#"{"statusCode":500,"message":"Could not connect to remote host."}"#,
        )
        .await;

    match client.frontpage("http://down.example/").execute().await {
        Err(Error::Api { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, "Could not connect to remote host.");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_single_call() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let _mock = fixture
        .mock_get("/v2/product", 401, "application/json", r#"{"error":"Not authorized API token."}"#)
        .await;

    let err = client.products("http://shop.example/p").execute().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));
    assert!(!err.is_batch_failure());
}

#[tokio::test]
async fn test_classifier_with_stats() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let _mock = fixture
        .server
        .mock("GET", "/v2/analyze")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mode".into(), "product".into()),
            Matcher::UrlEncoded("stats".into(), "".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"type":"product","url":"http://shop.example/p","stats":{"confidence":0.93,"types":{"product":0.93,"article":0.02}},"products":[{"title":"Lamp"}]}"#,
        )
        .create_async()
        .await;

    let classified = client
        .classifier("http://shop.example/p")
        .mode(PageType::Product)
        .stats()
        .execute()
        .await
        .unwrap();
    assert_eq!(classified.page_type(), PageType::Product);
    let stats = classified.stats.as_ref().unwrap();
    assert!(stats.types.contains_key("product"));
    let products = classified.as_products().unwrap();
    assert_eq!(products.products.len(), 1);
}
