// src/specs/companies.rs
//! Scraping rules for the company revenue table.
//!
//! Purpose:
//! - Find the first `wikitable` on the article whose header row carries all
//!   seven expected columns, matched **by name** (never by position).
//! - Yield one `RawRecord` (column → raw cell text) per data row.
//!
//! Responsibilities:
//! - HTML slicing via `core::html`, text cleanup via `core::sanitize`.
//! - `rowspan`/`colspan` expansion so cells line up with the header.
//!
//! Non-Responsibilities:
//! - **No typing or validation** of cell values (see `normalize`).
//! - **No networking, caching or GUI state.**

use std::collections::HashMap;

use crate::core::html::{ self, CellKind, attr_value, cell_blocks, inner_after_open_tag, tag_blocks_ci };
use crate::core::sanitize::cell_text;
use crate::error::SchemaError;
use crate::model::Column;

/// One data row: raw cell text keyed by column. Cells the row doesn't have are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    cells: HashMap<Column, String>,
}

impl RawRecord {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, col: Column, text: impl Into<String>) -> Self {
        self.cells.insert(col, text.into());
        self
    }

    pub fn get(&self, col: Column) -> Option<&str> {
        self.cells.get(&col).map(String::as_str)
    }
}

/// The matched table: headers as found, where each column lives, and the rows.
#[derive(Clone, Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub positions: Vec<(Column, usize)>,
    pub rows: Vec<RawRecord>,
}

/// Compact comparison key: lowercase alphanumerics only.
/// "Revenue<br>(USD millions)" and "Revenue (USD millions)" compare equal.
pub fn header_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn column_for(header: &str) -> Option<Column> {
    let key = header_key(header);
    if key.is_empty() { return None; }
    Column::ALL
        .into_iter()
        .find(|c| c.aliases().iter().any(|a| header_key(a) == key))
}

/// Map each expected column to its index in `headers`; the second value lists
/// the columns that were not found.
fn match_signature(headers: &[String]) -> (Vec<(Column, usize)>, Vec<Column>) {
    let mut found: Vec<(Column, usize)> = Vec::new();
    for (i, h) in headers.iter().enumerate() {
        if let Some(col) = column_for(h) {
            if !found.iter().any(|(c, _)| *c == col) {
                found.push((col, i));
            }
        }
    }
    let missing = Column::ALL
        .into_iter()
        .filter(|c| !found.iter().any(|(f, _)| f == c))
        .collect();
    found.sort_by_key(|(c, _)| *c);
    (found, missing)
}

fn is_wikitable(table_block: &str) -> bool {
    let open = &table_block[..table_block.find('>').unwrap_or(table_block.len())];
    attr_value(open, "class")
        .map(|c| c.split_whitespace().any(|cls| cls.eq_ignore_ascii_case("wikitable")))
        .unwrap_or(false)
}

fn span(open_tag: &str, attr: &str) -> usize {
    attr_value(open_tag, attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
        .min(64)
}

/// Cell texts of one `<tr>`, expanded for colspan and for rowspans carried
/// down from earlier rows. Returns (has_data_cells, texts).
fn expand_row(tr: &str, carry: &mut Vec<Option<(String, usize)>>) -> (bool, Vec<String>) {
    let mut out: Vec<String> = Vec::new();
    let mut has_data = false;

    let take_carried = |out: &mut Vec<String>, carry: &mut Vec<Option<(String, usize)>>| {
        while let Some(Some((text, left))) = carry.get_mut(out.len()) {
            out.push(text.clone());
            *left -= 1;
            if *left == 0 {
                let ix = out.len() - 1;
                carry[ix] = None;
            }
        }
    };

    for (kind, s, e) in cell_blocks(tr) {
        take_carried(&mut out, carry);

        let block = &tr[s..e];
        let open = &block[..block.find('>').unwrap_or(block.len())];
        let text = cell_text(inner_after_open_tag(block));
        has_data |= kind == CellKind::Data;

        let cols = span(open, "colspan");
        let rows = span(open, "rowspan");
        for _ in 0..cols {
            let ix = out.len();
            if rows > 1 {
                if carry.len() <= ix { carry.resize(ix + 1, None); }
                carry[ix] = Some((text.clone(), rows - 1));
            }
            out.push(text.clone());
        }
    }
    take_carried(&mut out, carry);

    (has_data, out)
}

/// Stack one header row onto the ones above it, position by position.
/// A rowspanned label repeats down the rows and is kept once.
fn merge_header_row(merged: &mut Vec<String>, row: &[String]) {
    for (i, text) in row.iter().enumerate() {
        match merged.get_mut(i) {
            Some(m) if m.is_empty() => *m = text.clone(),
            Some(m) if text.is_empty() || m.ends_with(text.as_str()) => {}
            Some(m) => { m.push(' '); m.push_str(text); }
            None => merged.push(text.clone()),
        }
    }
}

/// Locate the company table and pull raw records out of it.
pub fn extract(doc: &str) -> Result<RawTable, SchemaError> {
    let mut inspected = 0usize;
    let mut best_missing: Option<Vec<Column>> = None;

    for (ts, te) in tag_blocks_ci(doc, "table") {
        let table = &doc[ts..te];
        if !is_wikitable(table) { continue; }
        inspected += 1;

        let trs = tag_blocks_ci(table, "tr");
        let mut carry: Vec<Option<(String, usize)>> = Vec::new();

        // Leading rows without <td> cells; a caption or grouping row may
        // sit above the one that names the columns
        let hdr_end = trs
            .iter()
            .position(|&(s, e)| cell_blocks(&table[s..e]).iter().any(|(k, _, _)| *k == CellKind::Data))
            .unwrap_or(trs.len());
        if hdr_end == 0 { continue; }

        let mut matched: Option<(Vec<String>, Vec<(Column, usize)>)> = None;
        let mut merged: Vec<String> = Vec::new();
        for &(s, e) in &trs[..hdr_end] {
            let (_, row) = expand_row(&table[s..e], &mut carry);
            merge_header_row(&mut merged, &row);

            for headers in [row, merged.clone()] {
                let (positions, missing) = match_signature(&headers);
                if missing.is_empty() {
                    matched = Some((headers, positions));
                    break;
                }
                if best_missing.as_ref().map_or(true, |b| missing.len() < b.len()) {
                    best_missing = Some(missing);
                }
            }
            if matched.is_some() { break; }
        }
        carry.clear();

        let Some((headers, positions)) = matched else {
            logd!("Extract: table #{inspected} skipped, best header missing {:?}", best_missing);
            continue;
        };

        let mut rows = Vec::new();
        for &(s, e) in &trs[hdr_end..] {
            let (has_data, cells) = expand_row(&table[s..e], &mut carry);
            if !has_data { continue; }

            let mut rec = RawRecord::new();
            for &(col, ix) in &positions {
                if let Some(text) = cells.get(ix) {
                    rec = rec.with(col, text.clone());
                }
            }
            rows.push(rec);
        }

        logf!("Extract: matched table #{inspected} ({} columns, {} rows)", headers.len(), rows.len());
        return Ok(RawTable { headers, positions, rows });
    }

    // Only report "missing columns" for a table that at least looked related
    match best_missing {
        Some(missing) if missing.len() < Column::ALL.len() - 1 => Err(SchemaError::MissingColumns { missing }),
        _ => Err(SchemaError::NoTable { tables: inspected }),
    }
}

/// Page `<title>`, used for log lines only.
pub fn page_title(doc: &str) -> Option<String> {
    let (s, e) = tag_blocks_ci(doc, "title").into_iter().next()?;
    let t = html::strip_tags(&doc[s..e]);
    if t.is_empty() { None } else { Some(t) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &str, body: &str) -> String {
        format!(r#"<table class="wikitable sortable"><tbody><tr>{header}</tr>{body}</tbody></table>"#)
    }

    const FULL_HEADER: &str = "<th>Rank</th><th>Name</th><th>Industry</th>\
        <th>Revenue <br/>(USD millions)</th><th>Revenue growth</th>\
        <th>Employees</th><th>Headquarters</th>";

    #[test]
    fn columns_are_matched_by_name_not_position() {
        let header = "<th>Name</th><th>Rank</th><th>Headquarters</th><th>Industry</th>\
            <th>Employees</th><th>Revenue growth</th><th>Revenue (USD millions)</th>";
        let body = "<tr><td>Walmart</td><td>1</td><td>Bentonville, Arkansas</td><td>Retail</td>\
            <td>2,100,000</td><td>6.7%</td><td>$648,125</td></tr>";
        let t = extract(&table(header, body)).unwrap();
        let r = &t.rows[0];
        assert_eq!(r.get(Column::Rank), Some("1"));
        assert_eq!(r.get(Column::Name), Some("Walmart"));
        assert_eq!(r.get(Column::Revenue), Some("$648,125"));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let header = "<th>Rank</th><th>Name</th><th>Industry</th><th>Revenue (USD millions)</th>\
            <th>Employees</th><th>Headquarters</th>";
        let err = extract(&table(header, "")).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumns { missing: vec![Column::RevenueGrowth] });
    }

    #[test]
    fn no_wikitable_is_no_table() {
        let err = extract("<html><table><tr><th>Rank</th></tr></table></html>").unwrap_err();
        assert_eq!(err, SchemaError::NoTable { tables: 0 });
    }

    #[test]
    fn rowspan_is_carried_down() {
        let body = r#"<tr><td>1</td><td>A</td><td rowspan="2">Retail</td><td>10</td><td>1%</td><td>5</td><td>X</td></tr>
            <tr><td>2</td><td>B</td><td>20</td><td>2%</td><td>6</td><td>Y</td></tr>"#;
        let t = extract(&table(FULL_HEADER, body)).unwrap();
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1].get(Column::Industry), Some("Retail"));
        assert_eq!(t.rows[1].get(Column::Revenue), Some("20"));
        assert_eq!(t.rows[1].get(Column::Headquarters), Some("Y"));
    }

    #[test]
    fn short_rows_leave_columns_absent() {
        let body = "<tr><td>3</td><td>C</td><td>Tech</td></tr>";
        let t = extract(&table(FULL_HEADER, body)).unwrap();
        assert_eq!(t.rows[0].get(Column::Industry), Some("Tech"));
        assert_eq!(t.rows[0].get(Column::Revenue), None);
    }

    #[test]
    fn caption_row_above_header_is_skipped() {
        let header = format!(r#"<th colspan="7">Largest companies by revenue</th></tr><tr>{FULL_HEADER}"#);
        let body = "<tr><td>1</td><td>Walmart</td><td>Retail</td><td>$648,125</td>\
            <td>6.0%</td><td>2,100,000</td><td>Bentonville, Arkansas</td></tr>";
        let t = extract(&table(&header, body)).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].get(Column::Name), Some("Walmart"));
        assert_eq!(t.rows[0].get(Column::Revenue), Some("$648,125"));
    }

    #[test]
    fn grouped_header_rows_are_merged() {
        let header = r#"<th rowspan="2">Rank</th><th rowspan="2">Name</th><th rowspan="2">Industry</th>
            <th colspan="2">Revenue</th><th rowspan="2">Employees</th><th rowspan="2">Headquarters</th>
            </tr><tr><th>USD millions</th><th>Growth</th>"#;
        let body = "<tr><td>2</td><td>Amazon</td><td>Retail and cloud</td><td>$574,785</td>\
            <td>11.8%</td><td>1,525,000</td><td>Seattle, Washington</td></tr>";
        let t = extract(&table(header, body)).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].get(Column::Rank), Some("2"));
        assert_eq!(t.rows[0].get(Column::Revenue), Some("$574,785"));
        assert_eq!(t.rows[0].get(Column::RevenueGrowth), Some("11.8%"));
        assert_eq!(t.rows[0].get(Column::Headquarters), Some("Seattle, Washington"));
    }

    #[test]
    fn caption_row_does_not_hide_missing_columns() {
        let header = "<th colspan=\"6\">Largest companies</th></tr><tr><th>Rank</th><th>Name</th>\
            <th>Industry</th><th>Revenue (USD millions)</th><th>Employees</th><th>Headquarters</th>";
        let err = extract(&table(header, "")).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumns { missing: vec![Column::RevenueGrowth] });
    }

    #[test]
    fn header_key_ignores_markup_spacing() {
        assert_eq!(header_key("Revenue (USD\u{a0}millions)"), header_key("Revenue(USD millions)"));
    }
}
