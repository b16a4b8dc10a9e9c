// src/model.rs
//
// Typed rows and the immutable dataset produced by one pipeline run.

use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::error::RowParseError;

/// The seven columns of the company table, in export order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Rank,
    Name,
    Industry,
    Revenue,
    RevenueGrowth,
    Employees,
    Headquarters,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Rank,
        Column::Name,
        Column::Industry,
        Column::Revenue,
        Column::RevenueGrowth,
        Column::Employees,
        Column::Headquarters,
    ];

    /// Header as it appears on the source page.
    pub fn header(self) -> &'static str {
        match self {
            Column::Rank          => "Rank",
            Column::Name          => "Name",
            Column::Industry      => "Industry",
            Column::Revenue       => "Revenue (USD millions)",
            Column::RevenueGrowth => "Revenue growth",
            Column::Employees     => "Employees",
            Column::Headquarters  => "Headquarters",
        }
    }

    /// Header written to CSV/TSV exports.
    pub fn export_header(self) -> &'static str {
        match self {
            Column::RevenueGrowth => "Revenue Growth %",
            other => other.header(),
        }
    }

    /// Accepted spellings of the source header, compared on a compact key
    /// (see `specs::companies::header_key`).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Rank          => &["Rank", "No."],
            Column::Name          => &["Name", "Company"],
            Column::Industry      => &["Industry", "Sector"],
            Column::Revenue       => &[
                "Revenue (USD millions)",
                "Revenue (US$ millions)",
                "Revenue (millions of USD)",
                "Revenue (millions of US$)",
            ],
            Column::RevenueGrowth => &["Revenue growth", "Growth"],
            Column::Employees     => &["Employees", "Number of employees"],
            Column::Headquarters  => &["Headquarters", "Headquarters location"],
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Rank | Column::Revenue | Column::RevenueGrowth | Column::Employees)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub rank: u32,
    pub name: String,
    pub industry: String,
    pub revenue_usd_millions: f64,
    pub revenue_growth_pct: Option<f64>,
    pub employees: Option<u64>,
    pub headquarters: String,
}

impl CompanyRecord {
    /// Display text for one column; absent values render empty.
    pub fn cell(&self, col: Column) -> String {
        match col {
            Column::Rank          => self.rank.to_string(),
            Column::Name          => self.name.clone(),
            Column::Industry      => self.industry.clone(),
            Column::Revenue       => fmt_number(self.revenue_usd_millions),
            Column::RevenueGrowth => self.revenue_growth_pct.map(fmt_number).unwrap_or_default(),
            Column::Employees     => self.employees.map(|e| e.to_string()).unwrap_or_default(),
            Column::Headquarters  => self.headquarters.clone(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        Column::ALL.iter().map(|&c| self.cell(c)).collect()
    }
}

/// Shortest text that parses back to the same value ("514405", "12.3").
pub fn fmt_number(v: f64) -> String {
    format!("{v}")
}

/// Rows discarded by the normalizer, with the reason for each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropReport {
    /// (source row position, reason)
    pub rows: Vec<(usize, RowParseError)>,
}

impl DropReport {
    pub fn count(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn push(&mut self, row: usize, err: RowParseError) { self.rows.push((row, err)); }
}

/// Output of one successful pipeline run. Never mutated after construction;
/// the cache replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<CompanyRecord>,
    fetched_at: DateTime<Utc>,
    dropped: DropReport,
}

impl Dataset {
    pub fn new(records: Vec<CompanyRecord>, fetched_at: DateTime<Utc>, dropped: DropReport) -> Self {
        Self { records, fetched_at, dropped }
    }

    pub fn records(&self) -> &[CompanyRecord] { &self.records }
    pub fn fetched_at(&self) -> DateTime<Utc> { self.fetched_at }
    pub fn dropped(&self) -> &DropReport { &self.dropped }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
