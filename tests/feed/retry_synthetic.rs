use std::time::Duration;

use httpmock::{Method::GET, MockServer};
use insider_collective::core::client::Backoff;
use insider_collective::{IcClient, IcError, InsiderFeed, RetryConfig};
use url::Url;

use crate::common::LISTING_PATH;

#[tokio::test]
async fn retries_retryable_statuses_when_enabled() {
    let server = MockServer::start();
    let max_retries = 2;

    let fail_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(503);
    });

    let client = IcClient::builder()
        .base_listing(Url::parse(&server.url(LISTING_PATH)).unwrap())
        .retry_config(RetryConfig {
            max_retries,
            backoff: Backoff::Fixed(Duration::from_millis(10)),
            ..RetryConfig::enabled()
        })
        .build()
        .unwrap();

    let err = InsiderFeed::new(&client).pages(1).load().await.unwrap_err();

    fail_mock.assert_calls((1 + max_retries) as usize);
    assert!(matches!(err, IcError::Status { status: 503, .. }));
}

#[tokio::test]
async fn retries_are_off_by_default() {
    let server = MockServer::start();

    let fail_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(503);
    });

    let client = crate::common::client_for(&server);
    assert!(!client.retry_config().enabled);

    let _ = InsiderFeed::new(&client).pages(1).load().await;
    fail_mock.assert_calls(1);
}

#[tokio::test]
async fn non_retryable_status_is_not_retried() {
    let server = MockServer::start();

    let not_found = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(404);
    });

    let client = IcClient::builder()
        .base_listing(Url::parse(&server.url(LISTING_PATH)).unwrap())
        .retry_config(RetryConfig::enabled())
        .build()
        .unwrap();

    let err = InsiderFeed::new(&client).pages(1).load().await.unwrap_err();
    not_found.assert_calls(1);
    assert!(matches!(err, IcError::Status { status: 404, .. }));
}
