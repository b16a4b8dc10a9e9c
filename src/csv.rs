// src/csv.rs
use std::io::{ self, Write };
use std::mem::take;

use crate::config::options::ExportFormat;
use crate::error::ExportError;
use crate::model::{ Column, CompanyRecord };
use crate::normalize::{ parse_currency, parse_integer, parse_percent };

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // "" escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{sep}")?; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

pub fn export_headers() -> Vec<String> {
    Column::ALL.iter().map(|c| s!(c.export_header())).collect()
}

/// Serialize records for Copy/Export. JSON ignores `include_headers`.
pub fn records_to_string(
    records: &[CompanyRecord],
    format: ExportFormat,
    include_headers: bool,
) -> Result<String, ExportError> {
    let Some(sep) = format.delimiter() else {
        return Ok(serde_json::to_string_pretty(records)?);
    };

    let mut buf: Vec<u8> = Vec::new();
    if include_headers {
        write_row(&mut buf, &export_headers(), sep)?;
    }
    for r in records {
        write_row(&mut buf, &r.to_row(), sep)?;
    }
    // Every cell came from a String, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/* ---------------- Reading exports back ---------------- */

fn field<'a>(row: &'a [String], col: Column) -> &'a str {
    row.get(col as usize).map(String::as_str).unwrap_or("")
}

fn opt_text(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

fn record_from_row(row: &[String], line: usize) -> Result<CompanyRecord, ExportError> {
    if row.len() != Column::ALL.len() {
        return Err(ExportError::Csv {
            line,
            msg: format!("expected {} fields, found {}", Column::ALL.len(), row.len()),
        });
    }
    let bad = |col: Column| ExportError::Csv {
        line,
        msg: format!("invalid {}: {:?}", col.export_header(), field(row, col)),
    };

    let rank = parse_integer(field(row, Column::Rank))
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| bad(Column::Rank))?;
    let revenue_usd_millions = parse_currency(field(row, Column::Revenue))
        .ok_or_else(|| bad(Column::Revenue))?;
    let revenue_growth_pct = match opt_text(field(row, Column::RevenueGrowth)) {
        Some(s) => Some(parse_percent(s).ok_or_else(|| bad(Column::RevenueGrowth))?),
        None => None,
    };
    let employees = match opt_text(field(row, Column::Employees)) {
        Some(s) => Some(parse_integer(s).ok_or_else(|| bad(Column::Employees))?),
        None => None,
    };

    Ok(CompanyRecord {
        rank,
        name: s!(field(row, Column::Name)),
        industry: s!(field(row, Column::Industry)),
        revenue_usd_millions,
        revenue_growth_pct,
        employees,
        headquarters: s!(field(row, Column::Headquarters)),
    })
}

/// Parse a delimited export back into records. A first row equal to the
/// export headers is skipped.
pub fn records_from_delimited(text: &str, sep: char) -> Result<Vec<CompanyRecord>, ExportError> {
    let rows = parse_rows(text, sep);
    let headers = export_headers();
    let skip = usize::from(rows.first().is_some_and(|r| *r == headers));

    rows.iter()
        .enumerate()
        .skip(skip)
        .map(|(i, row)| record_from_row(row, i + 1))
        .collect()
}

pub fn records_from_csv(text: &str) -> Result<Vec<CompanyRecord>, ExportError> {
    records_from_delimited(text, ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec() -> CompanyRecord {
        CompanyRecord {
            rank: 7,
            name: s!("Berkshire \"BRK\" Hathaway"),
            industry: s!("Conglomerate"),
            revenue_usd_millions: 364482.0,
            revenue_growth_pct: None,
            employees: Some(396_500),
            headquarters: s!("Omaha, Nebraska"),
        }
    }

    #[test]
    fn quotes_and_empty_cells() {
        let out = records_to_string(&[rec()], ExportFormat::Csv, true).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Rank,Name,Industry,Revenue (USD millions),Revenue Growth %,Employees,Headquarters"
        );
        assert_eq!(
            lines.next().unwrap(),
            "7,\"Berkshire \"\"BRK\"\" Hathaway\",Conglomerate,364482,,396500,\"Omaha, Nebraska\""
        );
    }

    #[test]
    fn tsv_without_headers_reads_back() {
        let out = records_to_string(&[rec()], ExportFormat::Tsv, false).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert_eq!(records_from_delimited(&out, '\t').unwrap(), vec![rec()]);
    }

    #[test]
    fn json_is_an_array_of_records() {
        let out = records_to_string(&[rec()], ExportFormat::Json, true).unwrap();
        let back: Vec<CompanyRecord> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, vec![rec()]);
    }

    #[test]
    fn short_row_reports_line() {
        let err = records_from_csv("1,Walmart\n").unwrap_err();
        assert!(matches!(err, ExportError::Csv { line: 1, .. }));
    }

    #[test]
    fn parser_handles_crlf_and_quoted_newline() {
        let rows = parse_rows("a,\"b\nc\"\r\nd,e", ',');
        assert_eq!(rows, vec![vec![s!("a"), s!("b\nc")], vec![s!("d"), s!("e")]]);
    }
}
