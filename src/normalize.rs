// src/normalize.rs
//
// Raw cell text → typed fields.
//
// Every parser is total: it returns a value or `None`, never an error.
// Whether a `None` drops the row or just leaves the field empty is decided
// in one place, `normalize_row`.

use std::collections::HashSet;

use crate::core::sanitize::normalize_ws;
use crate::error::RowParseError;
use crate::model::{ Column, CompanyRecord, DropReport };
use crate::specs::companies::RawRecord;

/// Blank-ish placeholders Wikipedia uses for "no value".
const PLACEHOLDERS: &[&str] = &["", "-", "–", "—", "−", "n/a", "na", "?", "unknown"];

fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    PLACEHOLDERS.iter().any(|p| t.eq_ignore_ascii_case(p))
}

/// Drop thousands separators: commas, plain/NBSP/thin/narrow spaces.
fn strip_separators(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}' | '\u{2009}' | '\u{202f}' | '\''))
        .collect()
}

/// Leading run of ASCII digits (after separators are gone).
fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

/// Leading unsigned decimal: digits with at most one '.'.
fn leading_decimal(s: &str) -> &str {
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot { seen_dot = true; return false; }
            !c.is_ascii_digit()
        })
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].trim_end_matches('.')
}

/// "2,100,000" → 2100000; "1,525,000 (2023)" → 1525000; "—" and "1.5 million" → None.
pub fn parse_integer(s: &str) -> Option<u64> {
    if is_placeholder(s) { return None; }
    let compact = strip_separators(s.trim());
    let body = compact.trim_start_matches('#');
    let digits = leading_digits(body);
    if digits.is_empty() { return None; }
    // "1.5 million" is not 1
    let mut after = body[digits.len()..].chars();
    if after.next() == Some('.') && after.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// "$514,405" → 514405.0; "US$ 1,234.5 million" → 1234.5.
/// Negative amounts, dashes and text without digits → None.
pub fn parse_currency(s: &str) -> Option<f64> {
    if is_placeholder(s) { return None; }
    let compact = strip_separators(s.trim());
    let mut rest = compact.as_str();
    for prefix in ["US$", "USD", "$"] {
        if let Some(r) = rest.strip_prefix(prefix) {
            rest = r;
            break;
        }
    }
    let num = leading_decimal(rest);
    if num.is_empty() { return None; }
    num.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// "12.3%" → 12.3; "−4.1%" → -4.1; "Decrease 4.1%" → -4.1; "—" → None.
pub fn parse_percent(s: &str) -> Option<f64> {
    if is_placeholder(s) { return None; }
    let lower = s.to_lowercase();
    let decrease = lower.contains("decrease") || s.contains('▼') || s.contains('↓');

    // Keep only the numeric part, with a sign if one was written
    // A dash is a sign only when the number follows it ("Year-over-year 5%" is +5)
    let mut cleaned = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        let signs_number = || {
            chars.clone().find(|c| !c.is_whitespace()).is_some_and(|c| c.is_ascii_digit() || c == '.')
        };
        match ch {
            '0'..='9' | '.' => cleaned.push(ch),
            '-' | '−' | '–' if cleaned.is_empty() && signs_number() => cleaned.push('-'),
            _ if !cleaned.is_empty() && cleaned != "-" => break,
            _ => {}
        }
    }
    let negative = cleaned.starts_with('-');
    let num = leading_decimal(cleaned.trim_start_matches('-'));
    if num.is_empty() { return None; }

    let v: f64 = num.parse().ok().filter(|v: &f64| v.is_finite())?;
    Some(if negative || decrease { -v } else { v })
}

/// Trimmed, whitespace-collapsed text; empty → None.
pub fn parse_text(s: &str) -> Option<String> {
    let t = normalize_ws(s);
    if t.is_empty() { None } else { Some(t) }
}

fn required<T>(
    raw: &RawRecord,
    col: Column,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, RowParseError> {
    let cell = raw.get(col).ok_or(RowParseError::Missing(col))?;
    parse(cell).ok_or_else(|| {
        if normalize_ws(cell).is_empty() {
            RowParseError::Missing(col)
        } else {
            RowParseError::Invalid { column: col, raw: s!(cell) }
        }
    })
}

fn optional<T>(raw: &RawRecord, col: Column, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    raw.get(col).and_then(parse)
}

/// One raw row → one record, or the reason it is dropped.
pub fn normalize_row(raw: &RawRecord) -> Result<CompanyRecord, RowParseError> {
    let rank = required(raw, Column::Rank, |s| {
        parse_integer(s).filter(|&r| r > 0).and_then(|r| u32::try_from(r).ok())
    })?;
    let name = required(raw, Column::Name, parse_text)?;
    let revenue_usd_millions = required(raw, Column::Revenue, parse_currency)?;

    Ok(CompanyRecord {
        rank,
        name,
        industry: optional(raw, Column::Industry, parse_text).unwrap_or_default(),
        revenue_usd_millions,
        revenue_growth_pct: optional(raw, Column::RevenueGrowth, parse_percent),
        employees: optional(raw, Column::Employees, parse_integer),
        headquarters: optional(raw, Column::Headquarters, parse_text).unwrap_or_default(),
    })
}

/// Records in source order plus what was dropped.
#[derive(Clone, Debug, Default)]
pub struct Normalized {
    pub records: Vec<CompanyRecord>,
    pub report: DropReport,
}

/// Normalize a whole table. Source rank is trusted as-is; a rank seen before
/// drops the later row.
pub fn normalize_rows(rows: &[RawRecord]) -> Normalized {
    let mut out = Normalized::default();
    let mut seen: HashSet<u32> = HashSet::with_capacity(rows.len());

    for (pos, raw) in rows.iter().enumerate() {
        let rec = normalize_row(raw).and_then(|r| {
            if seen.insert(r.rank) { Ok(r) } else { Err(RowParseError::DuplicateRank(r.rank)) }
        });
        match rec {
            Ok(r) => out.records.push(r),
            Err(e) => {
                logd!("Normalize: row {pos} dropped: {e}");
                out.report.push(pos, e);
            }
        }
    }

    if !out.report.is_empty() {
        logf!("Normalize: kept {} rows, dropped {}", out.records.len(), out.report.count());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: &str, name: &str, revenue: Option<&str>, growth: &str) -> RawRecord {
        let r = RawRecord::new()
            .with(Column::Rank, rank)
            .with(Column::Name, name)
            .with(Column::Industry, "Retail")
            .with(Column::RevenueGrowth, growth)
            .with(Column::Employees, "2,100,000")
            .with(Column::Headquarters, " Bentonville,  Arkansas ");
        match revenue {
            Some(v) => r.with(Column::Revenue, v),
            None => r,
        }
    }

    #[test]
    fn currency_strips_symbol_and_commas() {
        assert_eq!(parse_currency("$514,405"), Some(514405.0));
        assert_eq!(parse_currency("US$1,234.5"), Some(1234.5));
        assert_eq!(parse_currency("611,289 (2023)"), Some(611289.0));
        assert_eq!(parse_currency("—"), None);
        assert_eq!(parse_currency("-5"), None);
        assert_eq!(parse_currency("n/a"), None);
    }

    #[test]
    fn percent_keeps_sign() {
        assert_eq!(parse_percent("12.3%"), Some(12.3));
        assert_eq!(parse_percent("−4.1%"), Some(-4.1));
        assert_eq!(parse_percent("-0.5 %"), Some(-0.5));
        assert_eq!(parse_percent("Decrease 4.1%"), Some(-4.1));
        assert_eq!(parse_percent("Increase 6.7%"), Some(6.7));
        assert_eq!(parse_percent("—"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn percent_dash_inside_words_is_not_a_sign() {
        assert_eq!(parse_percent("Year-over-year 5%"), Some(5.0));
        assert_eq!(parse_percent("- 2.5%"), Some(-2.5));
        assert_eq!(parse_percent("–.5%"), Some(-0.5));
    }

    #[test]
    fn integer_strips_separators() {
        assert_eq!(parse_integer("2,100,000"), Some(2_100_000));
        assert_eq!(parse_integer("1\u{a0}525\u{a0}000"), Some(1_525_000));
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn integer_rejects_fractional_amounts() {
        assert_eq!(parse_integer("1.5 million"), None);
        assert_eq!(parse_integer("2,100,000."), Some(2_100_000));
        assert_eq!(parse_integer("1,525,000 (2023)"), Some(1_525_000));
    }

    #[test]
    fn dash_growth_keeps_row() {
        let r = normalize_row(&row("1", "Walmart", Some("$648,125"), "—")).unwrap();
        assert_eq!(r.revenue_growth_pct, None);
        assert_eq!(r.revenue_usd_millions, 648125.0);
        assert_eq!(r.headquarters, "Bentonville, Arkansas");
        assert_eq!(r.employees, Some(2_100_000));
    }

    #[test]
    fn missing_revenue_drops_row() {
        let n = normalize_rows(&[
            row("1", "Walmart", Some("$648,125"), "6%"),
            row("2", "Amazon", None, "11.8%"),
        ]);
        assert_eq!(n.records.len(), 1);
        assert_eq!(n.report.count(), 1);
        assert_eq!(n.report.rows[0], (1, RowParseError::Missing(Column::Revenue)));
    }

    #[test]
    fn blank_name_and_zero_rank_drop() {
        assert_eq!(
            normalize_row(&row("3", "   ", Some("1"), "")),
            Err(RowParseError::Missing(Column::Name))
        );
        assert!(matches!(
            normalize_row(&row("0", "X", Some("1"), "")),
            Err(RowParseError::Invalid { column: Column::Rank, .. })
        ));
    }

    #[test]
    fn duplicate_rank_keeps_first_and_source_order() {
        let n = normalize_rows(&[
            row("2", "B", Some("20"), ""),
            row("1", "A", Some("30"), ""),
            row("2", "C", Some("10"), ""),
        ]);
        let names: Vec<&str> = n.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(n.report.rows[0].1, RowParseError::DuplicateRank(2));
    }
}
