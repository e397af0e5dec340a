use insider_collective::report::{
    insider_counts, insiders_by_role, median, summarize, top_by_insiders, top_by_volume,
    volume_by_role,
};
use insider_collective::{Dataset, Report, Role, TOP_N};

use crate::common::tx;

#[test]
fn summary_ignores_missing_amounts() {
    let rows = vec![
        tx("2026-10-01", "AAA", "a", "CEO", Some(100.0)),
        tx("2026-10-01", "BBB", "b", "CEO", None),
        tx("2026-10-02", "AAA", "c", "CFO", Some(300.0)),
    ];
    let s = summarize(&rows);
    assert_eq!(s.total_volume, 400.0);
    assert_eq!(s.median_amount, Some(200.0));
    assert_eq!(s.companies, 2);
    assert_eq!(s.rows, 3);
    assert_eq!(s.priced_rows, 2);
}

#[test]
fn median_of_odd_even_and_empty_sets() {
    assert_eq!(median(&mut [5.0, 1.0, 3.0]), Some(3.0));
    assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&mut []), None);

    let s = summarize(&[tx("2026-10-01", "AAA", "a", "CEO", None)]);
    assert_eq!(s.total_volume, 0.0);
    assert_eq!(s.median_amount, None);
    assert_eq!(s.companies, 1);
}

#[test]
fn top_by_volume_keeps_first_appearance_order_on_ties() {
    let rows = vec![
        tx("2026-10-01", "A", "a1", "CEO", Some(60.0)),
        tx("2026-10-01", "B", "b1", "CEO", Some(100.0)),
        tx("2026-10-01", "C", "c1", "CEO", Some(50.0)),
        tx("2026-10-02", "A", "a2", "Director", Some(40.0)),
    ];
    let top = top_by_volume(&rows, 2);
    let got: Vec<(&str, f64)> = top.iter().map(|v| (v.symbol.as_str(), v.amount)).collect();
    assert_eq!(got, vec![("A", 100.0), ("B", 100.0)]);

    let mut reversed = rows.clone();
    reversed.swap(0, 1);
    let top = top_by_volume(&reversed, 2);
    assert_eq!(top[0].symbol, "B");
    assert_eq!(top[1].symbol, "A");

    assert_eq!(top_by_volume(&rows, 10).len(), 3);
    assert!(top_by_volume(&rows, 0).is_empty());
}

#[test]
fn role_breakdown_sums_to_symbol_totals() {
    let rows = vec![
        tx("2026-10-01", "AAA", "a", "CEO", Some(100.0)),
        tx("2026-10-01", "AAA", "b", "Director", Some(50.0)),
        tx("2026-10-01", "AAA", "c", "10% Owner", None),
        tx("2026-10-02", "AAA", "d", "Chief Executive Officer", Some(25.0)),
        tx("2026-10-02", "BBB", "e", "President", Some(500.0)),
        tx("2026-10-02", "CCC", "f", "CFO", Some(1.0)),
    ];
    let top = top_by_volume(&rows, 2);
    let by_role = volume_by_role(&rows, &top);

    for sv in &top {
        let sum: f64 = by_role
            .iter()
            .filter(|r| r.symbol == sv.symbol)
            .map(|r| r.amount)
            .sum();
        assert!((sum - sv.amount).abs() < 1e-9, "{}: {sum} vs {}", sv.symbol, sv.amount);
    }

    let got: Vec<(&str, Role, f64)> = by_role
        .iter()
        .map(|r| (r.symbol.as_str(), r.role, r.amount))
        .collect();
    assert_eq!(
        got,
        vec![
            ("BBB", Role::President, 500.0),
            ("AAA", Role::Ceo, 125.0),
            ("AAA", Role::Director, 50.0),
            ("AAA", Role::TenPercentOwner, 0.0),
        ]
    );
}

#[test]
fn insider_counts_are_distinct_names() {
    let rows = vec![
        tx("2026-10-01", "AAA", "Doe Jane", "CEO", Some(10.0)),
        tx("2026-10-02", "AAA", "Doe Jane", "CEO", Some(20.0)),
        tx("2026-10-02", "AAA", "Roe Rick", "Director", Some(5.0)),
        tx("2026-10-03", "BBB", "Poe Pat", "CFO", None),
        tx("2026-10-03", "CCC", "Lee Lin", "Director", Some(1.0)),
        tx("2026-10-03", "CCC", "Kim Kai", "Director", Some(2.0)),
        tx("2026-10-03", "CCC", "Ray Rae", "EVP", Some(3.0)),
    ];

    let table = insider_counts(&rows);
    let got: Vec<(&str, usize, f64)> = table
        .iter()
        .map(|r| (r.symbol.as_str(), r.insiders, r.total_amount))
        .collect();
    assert_eq!(
        got,
        vec![("CCC", 3, 6.0), ("AAA", 2, 35.0), ("BBB", 1, 0.0)]
    );

    let top = top_by_insiders(&rows, 2);
    assert_eq!(top.len(), 2);
    let by_role = insiders_by_role(&rows, &top);
    let got: Vec<(&str, Role, usize)> = by_role
        .iter()
        .map(|r| (r.symbol.as_str(), r.role, r.insiders))
        .collect();
    assert_eq!(
        got,
        vec![
            ("CCC", Role::Director, 2),
            ("CCC", Role::ExecutiveVp, 1),
            ("AAA", Role::Ceo, 1),
            ("AAA", Role::Director, 1),
        ]
    );
}

#[test]
fn empty_dataset_builds_an_empty_report() {
    let report = Report::build(&Dataset::new(Vec::new()), TOP_N);
    assert_eq!(report.summary.total_volume, 0.0);
    assert_eq!(report.summary.median_amount, None);
    assert_eq!(report.summary.companies, 0);
    assert!(report.top_by_volume.is_empty());
    assert!(report.volume_by_role.is_empty());
    assert!(report.transactions.is_empty());
    assert!(report.top_by_insiders.is_empty());
    assert!(report.insiders_by_role.is_empty());
    assert!(report.insider_table.is_empty());
}

#[test]
fn report_serializes_with_role_labels() {
    let ds = Dataset::new(vec![tx("2026-10-01", "AAA", "a", "10% Owner", Some(1.0))]);
    let report = Report::build(&ds, TOP_N);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["volume_by_role"][0]["role"], "Shareholder (10%+)");
    assert_eq!(json["transactions"][0]["filing"], "2026-10-01");
    assert_eq!(json["summary"]["companies"], 1);
}
