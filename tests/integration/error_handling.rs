//! Integration tests for error handling

use crate::integration::mock_server::{article_json, MockServerFixture};
use diffbot_rust::model::BatchResponse;
use diffbot_rust::{DiffbotClient, Error};

#[tokio::test]
async fn test_batch_unauthorized_requeues_everything() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let _mock = fixture.mock_batch_status(401).await;

    let a = client.article("http://a.example/").queue();
    let b = client.article("http://b.example/").queue();

    let err = a.wait().await.unwrap_err();
    assert!(err.is_batch_failure());
    assert!(matches!(err.inner(), Error::Unauthorized { .. }));
    assert!(!err.is_retryable());
    assert_eq!(client.queue_len(), 2);
    assert!(!a.is_resolved());
    assert!(!b.is_resolved());
}

#[tokio::test]
async fn test_server_error_then_successful_retry() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();

    let a_req = client.article("http://a.example/");
    let b_req = client.article("http://b.example/");
    let a_url = a_req.descriptor().relative_url().to_string();
    let b_url = b_req.descriptor().relative_url().to_string();
    let a = a_req.queue();
    let b = b_req.queue();

    let failing = fixture.mock_batch_status(503).await;
    let err = b.wait().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(err.is_retryable());
    assert_eq!(client.queue_len(), 2);
    failing.assert_async().await;
    failing.remove_async().await;

    let ok = fixture
        .mock_batch(&[
            BatchResponse::new(a_url, 200, "application/json", article_json("http://a.example/", "A")),
            BatchResponse::new(b_url, 200, "application/json", article_json("http://b.example/", "B")),
        ])
        .await;
    assert_eq!(a.wait().await.unwrap().title.as_deref(), Some("A"));
    assert_eq!(b.wait().await.unwrap().title.as_deref(), Some("B"));
    assert_eq!(client.queue_len(), 0);
    ok.assert_async().await;
}

#[tokio::test]
async fn test_resolved_failure_is_not_retried() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let req = client.article("http://broken.example/");
    let url = req.descriptor().relative_url().to_string();

    let mock = fixture
        .server
        .mock("POST", "/api/batch")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(serde_json::to_string(&[BatchResponse::new(url, 200, "application/json", "{oops")]).unwrap())
        .expect(1)
        .create_async()
        .await;

    let pending = req.queue();
    assert!(matches!(pending.wait().await, Err(Error::Parse { .. })));
    assert!(matches!(pending.wait().await, Err(Error::Parse { .. })));
    assert!(matches!(pending.try_get(), Some(Err(Error::Parse { .. }))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_retryable_batch_failure() {
    let client = DiffbotClient::builder()
        .token("test-token")
        .base_url_override("http://127.0.0.1:1")
        .build()
        .unwrap();
    let pending = client.images("http://a.example/").queue();

    let err = pending.wait().await.unwrap_err();
    assert!(err.is_batch_failure());
    assert!(err.is_retryable());
    assert_eq!(err.status_code(), None);
    assert_eq!(client.queue_len(), 1);
}
