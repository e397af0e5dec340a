use std::time::Duration;

use httpmock::{Method::GET, MockServer};
use insider_collective::{InsiderFeed, Role};

use crate::common::{LISTING_PATH, client_for, fixture, listing_html, row};

#[tokio::test]
async fn offline_feed_parses_sample_listing_page() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH).query_param("L", "1");
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("listing", "sample", "html"));
    });

    let ds = InsiderFeed::new(&client_for(&server))
        .pages(1)
        .load()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.rows[1].symbol, "PFE");
    assert_eq!(ds.rows[1].role, Role::Ceo);
}

#[tokio::test]
async fn pages_are_fetched_and_concatenated_in_order() {
    let server = MockServer::start();

    let pages = [
        listing_html(&[
            row("2026-10-15", "P1A", "a", "CEO", "1"),
            row("2026-10-15", "P1B", "b", "CFO", "2"),
        ]),
        listing_html(&[
            row("2026-10-14", "P2A", "c", "Director", "3"),
            row("2026-10-14", "P2B", "d", "President", "4"),
        ]),
        listing_html(&[
            row("2026-10-13", "P3A", "e", "10% Owner", "5"),
            row("2026-10-13", "P3B", "f", "SVP", "6"),
        ]),
    ];
    let mocks: Vec<_> = pages
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let page = (i + 1).to_string();
            server.mock(|when, then| {
                when.method(GET).path(LISTING_PATH).query_param("L", page);
                then.status(200).body(body.clone());
            })
        })
        .collect();

    let ds = InsiderFeed::new(&client_for(&server))
        .pages(3)
        .load()
        .await
        .unwrap();

    for m in &mocks {
        m.assert();
    }
    let symbols: Vec<&str> = ds.rows.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["P1A", "P1B", "P2A", "P2B", "P3A", "P3B"]);
    assert!(ds.skipped_pages.is_empty());
}

#[tokio::test]
async fn concurrent_fetches_keep_page_order() {
    let server = MockServer::start();

    // The first page answers last.
    let slow = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH).query_param("L", "1");
        then.status(200)
            .delay(Duration::from_millis(300))
            .body(listing_html(&[row("2026-10-15", "SLOW", "a", "CEO", "1")]));
    });
    let fast: Vec<_> = (2..=4)
        .map(|p| {
            server.mock(move |when, then| {
                when.method(GET)
                    .path(LISTING_PATH)
                    .query_param("L", p.to_string());
                then.status(200).body(listing_html(&[row(
                    "2026-10-14",
                    &format!("FAST{p}"),
                    "b",
                    "CFO",
                    "2",
                )]));
            })
        })
        .collect();

    let ds = InsiderFeed::new(&client_for(&server))
        .pages(4)
        .concurrency(4)
        .load()
        .await
        .unwrap();

    slow.assert();
    for m in &fast {
        m.assert();
    }
    let symbols: Vec<&str> = ds.rows.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["SLOW", "FAST2", "FAST3", "FAST4"]);
}
