//! Integration tests for the batch API against a mock server

use crate::integration::mock_server::{article_json, frontpage_dml, MockServerFixture, TEST_TOKEN};
use diffbot_rust::model::{BatchRequest, BatchResponse};
use diffbot_rust::{Extracted, HttpMethod, Model, PageType};
use mockito::Matcher;

#[tokio::test]
async fn test_article_and_frontpage_in_one_call() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let page = "http://news.example.com/";

    let article_req = client.article(page);
    let frontpage_req = client.frontpage(page);
    let article_url = article_req.descriptor().relative_url().to_string();
    let frontpage_url = frontpage_req.descriptor().relative_url().to_string();

    // Answered out of order on purpose.
    let mock = fixture
        .mock_batch(&[
            BatchResponse::new(frontpage_url.clone(), 200, "text/xml;charset=UTF-8", frontpage_dml(page)),
            BatchResponse::new(article_url.clone(), 200, "application/json", article_json(page, "Headline")),
        ])
        .await;

    let article = article_req.queue();
    let frontpage = frontpage_req.queue();
    assert_eq!(client.queue_len(), 2);

    let a = article.wait().await.unwrap();
    assert_eq!(a.title.as_deref(), Some("Headline"));
    assert!(frontpage.is_resolved());
    assert_eq!(client.queue_len(), 0);

    let f = frontpage.wait().await.unwrap();
    assert_eq!(f.url(), Some(page));
    assert_eq!(f.items.len(), 1);
    assert_eq!(f.items[0].title.as_deref(), Some("Lead story"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_query_carries_sub_requests_in_order() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();

    let first = client.article("http://a.example/");
    let second = client.products("http://b.example/").fields("offerPrice");
    let expected = serde_json::to_string(&vec![
        BatchRequest {
            method: HttpMethod::Get,
            relative_url: first.descriptor().relative_url().to_string(),
        },
        BatchRequest {
            method: HttpMethod::Get,
            relative_url: second.descriptor().relative_url().to_string(),
        },
    ])
    .unwrap();

    let mock = fixture
        .server
        .mock("POST", "/api/batch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("batch".into(), expected),
            Matcher::UrlEncoded("token".into(), TEST_TOKEN.into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let first = first.queue();
    let _second = second.queue();

    // An empty answer leaves both requests queued and tells the initiator.
    let err = first.wait().await.unwrap_err();
    assert!(err.is_batch_failure());
    assert_eq!(client.queue_len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sub_request_errors_stay_per_item() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();

    let good = client.article("http://good.example/");
    let broken = client.article("not a url");
    let missing = client.images("http://missing.example/");
    let good_url = good.descriptor().relative_url().to_string();
    let broken_url = broken.descriptor().relative_url().to_string();
    let missing_url = missing.descriptor().relative_url().to_string();

    let _mock = fixture
        .mock_batch(&[
            BatchResponse::new(broken_url, 500, "text/plain", "Invalid URL"),
            BatchResponse::new(
                missing_url,
                200,
                "application/json",
                r#"{"error":"Could not download page (404)","errorCode":404}"#,
            ),
            BatchResponse::new(good_url, 200, "application/json", article_json("http://good.example/", "Fine")),
        ])
        .await;

    let good = good.queue();
    let broken = broken.queue();
    let missing = missing.queue();

    let err = broken.wait().await.unwrap_err();
    assert!(!err.is_batch_failure());
    assert_eq!(err.status_code(), Some(500));

    assert_eq!(good.wait().await.unwrap().title.as_deref(), Some("Fine"));

    match missing.wait().await.unwrap_err() {
        diffbot_rust::Error::Api { code, .. } => assert_eq!(code, 404),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_article_and_classifier_describe_the_same_page() {
    let mut fixture = MockServerFixture::new().await;
    let client = fixture.create_test_client();
    let page = "http://blog.example.com/post";

    let article_req = client.article(page);
    let classified_req = client.classifier(page).mode(PageType::Article);
    let _mock = fixture
        .mock_batch(&[
            BatchResponse::new(
                article_req.descriptor().relative_url(),
                200,
                "application/json",
                article_json(page, "Post"),
            ),
            BatchResponse::new(
                classified_req.descriptor().relative_url(),
                200,
                "application/json",
                article_json(page, "Post"),
            ),
        ])
        .await;

    let article = article_req.queue();
    let classified = classified_req.queue();
    let article = Model::Article(article.wait().await.unwrap());
    let classified = classified.wait().await.unwrap();

    assert_eq!(classified.page_type(), PageType::Article);
    assert_eq!(article, Model::Classified(classified.clone()));
    assert!(classified.as_article().unwrap().same_page(&article));
}
