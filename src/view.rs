// src/view.rs
//! Filtered/sorted projection of a `Dataset` for display, charts and export.
//!
//! A view is a list of row indices into the dataset (no cloned rows), built
//! from a `ViewQuery`. Everything here is a pure function of
//! (dataset, query): no I/O, no caching.

use std::cmp::Ordering;
use std::collections::{ BTreeSet, HashMap };

use crate::model::{ Column, CompanyRecord, Dataset };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(self) -> Self {
        match self { SortDir::Asc => SortDir::Desc, SortDir::Desc => SortDir::Asc }
    }
}

/// Filter + sort selection. Empty `industries` means "all".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewQuery {
    pub industries: Vec<String>,
    pub revenue_min: Option<f64>,
    pub revenue_max: Option<f64>,
    pub sort: Option<(Column, SortDir)>,
}

impl ViewQuery {
    pub fn keeps(&self, r: &CompanyRecord) -> bool {
        if !self.industries.is_empty() && !self.industries.iter().any(|i| *i == r.industry) {
            return false;
        }
        if self.revenue_min.is_some_and(|min| r.revenue_usd_millions < min) { return false; }
        if self.revenue_max.is_some_and(|max| r.revenue_usd_millions > max) { return false; }
        true
    }
}

/// Compare two records on one column. Absent values compare as `None`
/// and are placed by `select`, not here.
fn cmp_on(a: &CompanyRecord, b: &CompanyRecord, col: Column) -> Ordering {
    fn opt<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
    match col {
        Column::Rank          => a.rank.cmp(&b.rank),
        Column::Name          => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        Column::Industry      => a.industry.to_lowercase().cmp(&b.industry.to_lowercase()),
        Column::Revenue       => a.revenue_usd_millions.total_cmp(&b.revenue_usd_millions),
        Column::RevenueGrowth => opt(a.revenue_growth_pct, b.revenue_growth_pct),
        Column::Employees     => opt(a.employees, b.employees),
        Column::Headquarters  => a.headquarters.to_lowercase().cmp(&b.headquarters.to_lowercase()),
    }
}

fn is_absent(r: &CompanyRecord, col: Column) -> bool {
    match col {
        Column::RevenueGrowth => r.revenue_growth_pct.is_none(),
        Column::Employees => r.employees.is_none(),
        _ => false,
    }
}

/// Indices of the rows kept by `query`, in display order. Filtering keeps
/// source order; sorting is stable and puts absent values last in either direction.
pub fn select(ds: &Dataset, query: &ViewQuery) -> Vec<usize> {
    let recs = ds.records();
    let mut ix: Vec<usize> = recs
        .iter()
        .enumerate()
        .filter(|(_, r)| query.keeps(r))
        .map(|(i, _)| i)
        .collect();

    if let Some((col, dir)) = query.sort {
        ix.sort_by(|&a, &b| {
            let (ra, rb) = (&recs[a], &recs[b]);
            match (is_absent(ra, col), is_absent(rb, col)) {
                (false, true) => return Ordering::Less,
                (true, false) => return Ordering::Greater,
                (true, true) => return Ordering::Equal,
                _ => {}
            }
            let o = cmp_on(ra, rb, col);
            match dir { SortDir::Asc => o, SortDir::Desc => o.reverse() }
        });
    }
    ix
}

/// Zero-copy projection of a dataset.
#[derive(Clone, Debug)]
pub struct RecordView<'a> {
    /// Positions of kept rows in the dataset
    pub row_ix: Vec<usize>,
    raw: &'a Dataset,
}

impl<'a> RecordView<'a> {
    pub fn new(raw: &'a Dataset, query: &ViewQuery) -> Self {
        Self { row_ix: select(raw, query), raw }
    }

    /// Build a view directly from precomputed indices.
    pub fn from_indices(raw: &'a Dataset, row_ix: Vec<usize>) -> Self {
        Self { row_ix, raw }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &'a CompanyRecord> + '_ {
        let recs = self.raw.records();
        self.row_ix.iter().filter_map(move |&ix| recs.get(ix))
    }

    /// Materialize owned records (export/clipboard boundary).
    pub fn to_owned_records(&self) -> Vec<CompanyRecord> {
        self.iter().cloned().collect()
    }

    pub fn summary(&self) -> Summary { Summary::of(self.iter()) }
}

/// Dashboard metrics over the current view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub companies: usize,
    pub total_revenue: f64,
    pub total_employees: u64,
    pub industries: usize,
}

impl Summary {
    pub fn of<'r>(records: impl IntoIterator<Item = &'r CompanyRecord>) -> Self {
        let mut s = Summary::default();
        let mut inds: BTreeSet<&str> = BTreeSet::new();
        for r in records {
            s.companies += 1;
            s.total_revenue += r.revenue_usd_millions;
            s.total_employees += r.employees.unwrap_or(0);
            if !r.industry.is_empty() { inds.insert(r.industry.as_str()); }
        }
        s.industries = inds.len();
        s
    }
}

/// Sorted, de-duplicated, non-empty industries (filter choices).
pub fn industries(ds: &Dataset) -> Vec<String> {
    ds.records()
        .iter()
        .filter(|r| !r.industry.is_empty())
        .map(|r| r.industry.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Largest `n` by revenue, descending; ties keep view order.
pub fn top_by_revenue<'a>(view: &RecordView<'a>, n: usize) -> Vec<&'a CompanyRecord> {
    let mut v: Vec<&CompanyRecord> = view.iter().collect();
    v.sort_by(|a, b| b.revenue_usd_millions.total_cmp(&a.revenue_usd_millions));
    v.truncate(n);
    v
}

/// Largest `n` employers; rows without a head count are skipped.
pub fn top_by_employees<'a>(view: &RecordView<'a>, n: usize) -> Vec<&'a CompanyRecord> {
    let mut v: Vec<&CompanyRecord> = view.iter().filter(|r| r.employees.is_some()).collect();
    v.sort_by(|a, b| b.employees.cmp(&a.employees));
    v.truncate(n);
    v
}

/// Companies per industry, most common first, then by name.
pub fn industry_counts(view: &RecordView<'_>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in view.iter().filter(|r| !r.industry.is_empty()) {
        *counts.entry(r.industry.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (s!(k), v)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DropReport;
    use chrono::Utc;

    fn rec(rank: u32, name: &str, industry: &str, revenue: f64, growth: Option<f64>, emp: Option<u64>) -> CompanyRecord {
        CompanyRecord {
            rank,
            name: s!(name),
            industry: s!(industry),
            revenue_usd_millions: revenue,
            revenue_growth_pct: growth,
            employees: emp,
            headquarters: s!("Somewhere"),
        }
    }

    fn ds() -> Dataset {
        Dataset::new(
            vec![
                rec(1, "Walmart", "Retail", 648125.0, Some(6.0), Some(2_100_000)),
                rec(2, "Amazon", "Retail", 574785.0, Some(11.8), Some(1_525_000)),
                rec(3, "Apple", "Electronics", 383285.0, Some(-2.8), Some(161_000)),
                rec(4, "UnitedHealth", "Healthcare", 371622.0, None, None),
            ],
            Utc::now(),
            DropReport::default(),
        )
    }

    #[test]
    fn sort_descending_puts_absent_last() {
        let d = ds();
        let q = ViewQuery { sort: Some((Column::RevenueGrowth, SortDir::Desc)), ..Default::default() };
        assert_eq!(select(&d, &q), vec![1, 0, 2, 3]);
        let q = ViewQuery { sort: Some((Column::RevenueGrowth, SortDir::Asc)), ..Default::default() };
        assert_eq!(select(&d, &q), vec![2, 0, 1, 3]);
    }

    #[test]
    fn revenue_range_is_inclusive() {
        let d = ds();
        let q = ViewQuery { revenue_min: Some(383285.0), revenue_max: Some(574785.0), ..Default::default() };
        assert_eq!(select(&d, &q), vec![1, 2]);
    }

    #[test]
    fn summary_and_charts() {
        let d = ds();
        let v = RecordView::new(&d, &ViewQuery::default());
        let s = v.summary();
        assert_eq!(s.companies, 4);
        assert_eq!(s.total_employees, 3_786_000);
        assert_eq!(s.industries, 3);

        let top: Vec<&str> = top_by_employees(&v, 2).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(top, vec!["Walmart", "Amazon"]);
        assert_eq!(industry_counts(&v)[0], (s!("Retail"), 2));
        assert_eq!(industries(&d), vec!["Electronics", "Healthcare", "Retail"]);
    }
}
