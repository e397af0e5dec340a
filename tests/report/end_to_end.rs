use insider_collective::{
    FilterCriteria, IcError, InsiderFeed, ListingQuery, Report, Role, TOP_N,
    core::{PageFuture, PageSource},
};

use crate::common::{date, listing_html, row};

/// Serves canned pages in place of the HTTP client.
struct SyntheticPages(Vec<String>);

impl PageSource for SyntheticPages {
    fn fetch_page<'a>(&'a self, _query: &'a ListingQuery, page: u32) -> PageFuture<'a> {
        Box::pin(async move {
            self.0
                .get(page as usize - 1)
                .cloned()
                .ok_or_else(|| IcError::Status {
                    status: 404,
                    url: format!("synthetic://page/{page}"),
                })
        })
    }
}

fn three_pages() -> SyntheticPages {
    SyntheticPages(vec![
        listing_html(&[
            row("2026-10-15 18:01:00", "AAA", "Doe Jane", "CEO", "$100,000"),
            row("2026-10-14 17:00:00", "BBB", "Roe Rick", "Director", "$40,000"),
        ]),
        listing_html(&[
            row("2026-10-10 16:00:00", "AAA", "Poe Pat", "Executive Vice President", "$60,000"),
            row("2026-10-02 09:15:00", "CCC", "Lee Lin", "10% Owner", "N/A"),
        ]),
        listing_html(&[
            row("2026-09-25 12:00:00", "DDD", "Kim Kai", "Chief Technology Officer", "$20,000"),
            row("2026-09-20 12:00:00", "BBB", "Ray Rae", "President", "$80,000"),
        ]),
    ])
}

#[tokio::test]
async fn three_synthetic_pages_flow_through_to_a_report() {
    let dataset = InsiderFeed::with_source(three_pages())
        .pages(3)
        .load()
        .await
        .unwrap();

    assert_eq!(dataset.len(), 6);
    let symbols: Vec<&str> = dataset.rows.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAA", "BBB", "AAA", "CCC", "DDD", "BBB"]);
    let roles: Vec<Role> = dataset.rows.iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Ceo,
            Role::Director,
            Role::ExecutiveVp,
            Role::TenPercentOwner,
            Role::OtherCLevel,
            Role::President,
        ]
    );

    let window = FilterCriteria::between(date("2026-09-17"), date("2026-10-16")).unwrap();
    let report = Report::build(&window.apply(&dataset), TOP_N);

    assert_eq!(report.summary.rows, 6);
    assert_eq!(report.summary.priced_rows, 5);
    assert_eq!(report.summary.total_volume, 300_000.0);
    assert_eq!(report.summary.median_amount, Some(60_000.0));
    assert_eq!(report.summary.companies, 4);

    let top: Vec<(&str, f64)> = report
        .top_by_volume
        .iter()
        .map(|v| (v.symbol.as_str(), v.amount))
        .collect();
    assert_eq!(
        top,
        vec![("AAA", 160_000.0), ("BBB", 120_000.0), ("DDD", 20_000.0), ("CCC", 0.0)]
    );
}

#[tokio::test]
async fn narrower_window_drops_older_filings() {
    let dataset = InsiderFeed::with_source(three_pages())
        .pages(3)
        .load()
        .await
        .unwrap();

    let window = FilterCriteria::between(date("2026-10-10"), date("2026-10-15")).unwrap();
    let report = Report::build(&window.apply(&dataset), TOP_N);
    assert_eq!(report.summary.companies, 2);
    assert_eq!(report.summary.total_volume, 200_000.0);
    assert_eq!(report.insider_table[0].symbol, "AAA");
    assert_eq!(report.insider_table[0].insiders, 2);
}
