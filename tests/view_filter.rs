// tests/view_filter.rs
use chrono::Utc;
use revenue_scrape::model::{ Column, Dataset };
use revenue_scrape::pipeline::build_dataset;
use revenue_scrape::view::{ self, RecordView, SortDir, ViewQuery };

fn dataset() -> Dataset {
    let doc = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/companies.html"))
        .expect("read tests/fixtures/companies.html");
    build_dataset(&doc, Utc::now()).unwrap()
}

fn names<'a>(v: &RecordView<'a>) -> Vec<&'a str> {
    v.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn retail_filter_keeps_rank_order() {
    let ds = dataset();
    let q = ViewQuery { industries: vec!["Retail".into()], ..Default::default() };
    let v = RecordView::new(&ds, &q);

    assert_eq!(names(&v), vec!["Walmart", "Costco", "Kroger"]);
    assert!(v.iter().all(|r| r.industry == "Retail"));
    let ranks: Vec<u32> = v.iter().map(|r| r.rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn multi_select_and_revenue_range() {
    let ds = dataset();
    let q = ViewQuery {
        industries: vec!["Retail".into(), "Healthcare".into()],
        revenue_min: Some(300_000.0),
        revenue_max: Some(600_000.0),
        sort: None,
    };
    let v = RecordView::new(&ds, &q);
    assert_eq!(names(&v), vec!["UnitedHealth Group", "CVS Health"]);
}

#[test]
fn sort_by_employees_descending() {
    let ds = dataset();
    let q = ViewQuery { sort: Some((Column::Employees, SortDir::Desc)), ..Default::default() };
    let v = RecordView::new(&ds, &q);
    assert_eq!(&names(&v)[..3], &["Walmart", "Amazon", "UnitedHealth Group"]);
}

#[test]
fn growth_sort_puts_missing_last_both_ways() {
    let ds = dataset();
    for dir in [SortDir::Asc, SortDir::Desc] {
        let q = ViewQuery { sort: Some((Column::RevenueGrowth, dir)), ..Default::default() };
        let v = RecordView::new(&ds, &q);
        assert_eq!(v.iter().last().unwrap().name, "Kroger");
    }
}

#[test]
fn summary_tracks_the_filter() {
    let ds = dataset();
    let all = RecordView::new(&ds, &ViewQuery::default()).summary();
    assert_eq!(all.companies, 12);

    let q = ViewQuery { industries: vec!["Retail".into()], ..Default::default() };
    let retail = RecordView::new(&ds, &q).summary();
    assert_eq!(retail.companies, 3);
    assert_eq!(retail.total_revenue, 648125.0 + 242290.0 + 150039.0);
    assert_eq!(retail.total_employees, 2_100_000 + 316_000 + 414_000);
    assert_eq!(retail.industries, 1);
}

#[test]
fn chart_series() {
    let ds = dataset();
    let v = RecordView::new(&ds, &ViewQuery::default());

    let top = view::top_by_revenue(&v, 3);
    let top: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(top, vec!["Walmart", "Amazon", "Apple"]);

    let counts = view::industry_counts(&v);
    assert_eq!(counts[0], ("Retail".to_string(), 3));
    assert_eq!(counts[1], ("Healthcare".to_string(), 2));

    assert!(view::industries(&ds).contains(&"Petroleum industry".to_string()));
}
