// tests/extract_table.rs
use revenue_scrape::error::SchemaError;
use revenue_scrape::model::Column;
use revenue_scrape::specs::companies::{ extract, page_title };

fn fixture() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/companies.html"))
        .expect("read tests/fixtures/companies.html")
}

#[test]
fn picks_the_revenue_table_not_the_profit_table() {
    let doc = fixture();
    let t = extract(&doc).unwrap();
    assert_eq!(t.headers.len(), 7);
    assert_eq!(t.rows.len(), 13);
    assert_eq!(t.positions.len(), 7);
    assert_eq!(t.rows[0].get(Column::Revenue), Some("$648,125"));
}

#[test]
fn cell_text_is_cleaned() {
    let doc = fixture();
    let t = extract(&doc).unwrap();

    // footnote marker gone
    assert_eq!(t.rows[0].get(Column::Name), Some("Walmart"));
    // trend arrow kept as its alt text
    assert_eq!(t.rows[2].get(Column::RevenueGrowth), Some("Decrease 2.8%"));
    // inline TemplateStyles never leak into text
    assert_eq!(t.rows[4].get(Column::RevenueGrowth), Some("Increase 20.7%"));
    assert_eq!(t.rows[0].get(Column::Headquarters), Some("Bentonville, Arkansas"));
}

#[test]
fn renamed_header_is_a_schema_error() {
    let doc = fixture().replace("<th>Employees</th>", "<th>Staff</th>");
    match extract(&doc) {
        Err(SchemaError::MissingColumns { missing }) => assert_eq!(missing, vec![Column::Employees]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn page_without_tables() {
    let err = extract("<html><body><p>Moved</p></body></html>").unwrap_err();
    assert_eq!(err, SchemaError::NoTable { tables: 0 });
}

#[test]
fn title_is_read() {
    let title = page_title(&fixture()).unwrap();
    assert!(title.starts_with("List of largest companies in the United States by revenue"));
}
