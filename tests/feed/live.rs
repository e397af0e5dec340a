use insider_collective::{FailurePolicy, FilterCriteria, IcClient, InsiderFeed, Report, TOP_N};

#[tokio::test]
#[ignore]
async fn live_listing_smoke() {
    if !crate::common::live_or_record_enabled() {
        return;
    }

    let client = IcClient::builder().build().unwrap();
    let ds = InsiderFeed::new(&client)
        .pages(2)
        .failure_policy(FailurePolicy::BestEffort)
        .load()
        .await
        .unwrap();

    if !crate::common::is_recording() {
        assert!(!ds.is_empty());
        assert!(ds.rows.iter().all(|t| !t.symbol.is_empty()));

        let report = Report::build(&FilterCriteria::default().apply(&ds), TOP_N);
        assert!(report.summary.rows <= ds.len());
    }
}
