//! Batching properties checked against the scripted transport.

use crate::integration::scripted::{client_with, ScriptedTransport};
use diffbot_rust::{Article, Error, PendingResult};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn queue_articles(client: &diffbot_rust::DiffbotClient, n: usize) -> Vec<PendingResult<Article>> {
    (1..=n)
        .map(|i| client.article(format!("http://example.com/{}", i)).queue())
        .collect()
}

// Between calls nothing is in flight, so every unresolved request must be queued.
fn unresolved<T>(results: &[PendingResult<T>]) -> usize
where
    T: diffbot_rust::model::FromModel,
{
    results.iter().filter(|r| !r.is_resolved()).count()
}

#[tokio::test]
async fn test_bounded_slicing() {
    let transport = ScriptedTransport::new();
    let client = client_with(transport.clone(), 5, None);
    let results = queue_articles(&client, 7);

    assert_eq!(client.queue_len(), unresolved(&results));
    results[0].wait().await.unwrap();
    assert_eq!(transport.call_sizes(), vec![5]);
    assert_eq!(client.queue_len(), 2);
    assert_eq!(client.queue_len(), unresolved(&results));
    assert!(results[..5].iter().all(|r| r.is_resolved()));
    assert!(results[5..].iter().all(|r| !r.is_resolved()));

    results[5].wait().await.unwrap();
    assert_eq!(transport.call_sizes(), vec![5, 2]);
    assert_eq!(client.queue_len(), 0);
    assert_eq!(unresolved(&results), 0);
}

#[tokio::test]
async fn test_concurrent_slicing() {
    let transport = ScriptedTransport::new();
    let client = client_with(transport.clone(), 5, Some(2));
    let results = queue_articles(&client, 15);

    results[0].wait().await.unwrap();
    assert_eq!(transport.call_count(), 2);
    assert_eq!(client.queue_len(), 5);
    assert_eq!(client.queue_len(), unresolved(&results));

    for r in &results {
        r.wait().await.unwrap();
    }
    assert!(transport.call_count() <= 3);
    assert_eq!(transport.sent_urls().len(), 15);
}

#[tokio::test]
async fn test_duplicate_urls_resolve_in_submission_order() {
    let transport = ScriptedTransport::new();
    let client = client_with(transport.clone(), 25, None);
    let earlier = client.article("http://same.example/").queue();
    let later = client.article("http://same.example/").queue();

    earlier.wait().await.unwrap();
    // Reverse answers: the tuple for position 1 is encountered first.
    assert_eq!(earlier.try_get().unwrap().unwrap().title.as_deref(), Some("1"));
    assert_eq!(later.wait().await.unwrap().title.as_deref(), Some("0"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_atomic_failure_and_retry() {
    let transport = ScriptedTransport::with_failures(vec![Error::transport("connection reset")]);
    let client = client_with(transport.clone(), 25, None);
    let results = queue_articles(&client, 4);

    let err = results[2].wait().await.unwrap_err();
    assert!(err.is_batch_failure());
    assert_eq!(client.queue_len(), 4);
    assert_eq!(client.queue_len(), unresolved(&results));
    assert!(results.iter().all(|r| !r.is_resolved()));

    results[2].wait().await.unwrap();
    assert!(results.iter().all(|r| r.is_resolved()));
    assert_eq!(client.queue_len(), 0);
    assert_eq!(transport.call_sizes(), vec![4, 4]);
}

#[tokio::test]
async fn test_at_most_once_resolution() {
    let transport = ScriptedTransport::new();
    let client = client_with(transport.clone(), 25, None);
    let results = queue_articles(&client, 3);

    let first = results[1].wait().await.unwrap();
    for _ in 0..3 {
        let again = results[1].wait().await.unwrap();
        assert_eq!(again.title, first.title);
    }
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_sibling_failure_is_requeued() {
    // The initiator's own batch is sent first; the second call fails.
    let transport = ScriptedTransport::scripted(vec![None, Some(Error::server(502, "Bad Gateway"))]);
    let client = client_with(transport.clone(), 2, Some(3));
    let results = queue_articles(&client, 6);

    results[0].wait().await.unwrap();
    assert_eq!(transport.call_count(), 3);
    assert_eq!(client.queue_len(), 2);
    assert_eq!(results.iter().filter(|r| r.is_resolved()).count(), 4);

    for r in &results {
        r.wait().await.unwrap();
    }
    assert_eq!(transport.call_count(), 4);
    assert_eq!(client.queue_len(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_queue_conservation_under_concurrent_waiters() {
    let transport = ScriptedTransport::with_latency(Duration::from_millis(10));
    let client = client_with(transport.clone(), 5, None);
    let results = queue_articles(&client, 20);
    assert_eq!(client.queue_len(), 20);

    // Resolved is read before the queue: a request resolved by then can never be
    // queued again, so the two counts cannot overlap.
    let done = Arc::new(AtomicBool::new(false));
    let monitor = {
        let client = client.clone();
        let results = results.clone();
        let done = done.clone();
        tokio::spawn(async move {
            let mut samples = 0;
            loop {
                let resolved = results.len() - unresolved(&results);
                let queued = client.queue_len();
                assert!(queued + resolved <= results.len(), "queued={} resolved={}", queued, resolved);
                samples += 1;
                if done.load(Ordering::SeqCst) {
                    return samples;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
    };

    let tasks: Vec<_> = results
        .iter()
        .cloned()
        .map(|r| tokio::spawn(async move { r.wait().await }))
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    assert!(monitor.await.unwrap() >= 1);

    assert_eq!(client.queue_len(), 0);
    assert_eq!(unresolved(&results), 0);
    let sent = transport.sent_urls();
    assert_eq!(sent.len(), 20);
    assert_eq!(sent.iter().collect::<HashSet<_>>().len(), 20);
    assert!(transport.call_sizes().iter().all(|&n| n <= 5));
}
