// src/cli.rs
use std::{ env, path::PathBuf, time::Duration };

use chrono::Utc;
use color_eyre::eyre::{ bail, eyre, Result, WrapErr };

use crate::{
    config::options::{ AppOptions, ExportFormat },
    csv::records_to_string,
    file,
    pipeline::{ self, FileSource, HttpSource, Source },
    progress::StderrProgress,
    model::Column,
    normalize::parse_currency,
    view::{ RecordView, SortDir, Summary, ViewQuery },
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    pub query: ViewQuery,
    pub top: Option<usize>,
    pub summary: bool,
    pub format: ExportFormat,
    pub include_headers: bool,
    pub out: Option<String>,
    pub url: Option<String>,
    pub html: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub help: bool,
}

impl Params {
    pub fn new() -> Self {
        Self { include_headers: true, ..Default::default() }
    }
}

fn parse_sort_column(s: &str) -> Option<Column> {
    Some(match s.to_ascii_lowercase().as_str() {
        "rank" => Column::Rank,
        "name" => Column::Name,
        "industry" => Column::Industry,
        "revenue" => Column::Revenue,
        "growth" | "revenue-growth" => Column::RevenueGrowth,
        "employees" => Column::Employees,
        "headquarters" | "hq" => Column::Headquarters,
        _ => return None,
    })
}

fn parse_amount(flag: &str, v: &str) -> Result<f64> {
    parse_currency(v).ok_or_else(|| eyre!("Invalid amount for {flag}: {v}"))
}

pub fn parse_args<I>(args: I) -> Result<Params>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::new();
    let mut dir: Option<SortDir> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| eyre!("Missing value for {flag}"));
        match a.as_str() {
            "--industry" => params.query.industries.push(value("--industry")?),
            "--min-revenue" => params.query.revenue_min = Some(parse_amount(&a, &value(&a)?)?),
            "--max-revenue" => params.query.revenue_max = Some(parse_amount(&a, &value(&a)?)?),
            "--sort" => {
                let v = value("--sort")?;
                let col = parse_sort_column(&v).ok_or_else(|| eyre!("Unknown sort column: {v}"))?;
                params.query.sort = Some((col, SortDir::Asc));
            }
            "--asc" => dir = Some(SortDir::Asc),
            "--desc" => dir = Some(SortDir::Desc),
            "--top" => {
                let v = value("--top")?;
                params.top = Some(v.parse().wrap_err_with(|| format!("Invalid --top: {v}"))?);
            }
            "--summary" => params.summary = true,
            "--format" => {
                let v = value("--format")?;
                params.format = ExportFormat::parse(&v).ok_or_else(|| eyre!("Unknown format: {v}"))?;
            }
            "--no-headers" => params.include_headers = false,
            "-o" | "--out" => params.out = Some(value("--out")?),
            "--url" => params.url = Some(value("--url")?),
            "--html" => params.html = Some(PathBuf::from(value("--html")?)),
            "--timeout" => {
                let v = value("--timeout")?;
                params.timeout = Some(v.parse().wrap_err_with(|| format!("Invalid --timeout: {v}"))?);
            }
            "-h" | "--help" => params.help = true,
            _ => bail!("Unknown arg: {a}"),
        }
    }

    if let (Some(min), Some(max)) = (params.query.revenue_min, params.query.revenue_max) {
        if min > max {
            bail!("--min-revenue ({min}) is larger than --max-revenue ({max})");
        }
    }
    match (&mut params.query.sort, dir) {
        (Some((_, d)), Some(dir)) => *d = dir,
        (None, Some(_)) => bail!("--asc/--desc need --sort"),
        _ => {}
    }
    Ok(params)
}

fn summary_text(s: &Summary) -> String {
    format!(
        "Companies: {}\nTotal revenue (USD millions): {}\nTotal employees: {}\nIndustries: {}\n",
        s.companies, s.total_revenue, s.total_employees, s.industries
    )
}

pub fn run() -> Result<()> {
    let params = parse_args(env::args().skip(1))?;
    if params.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    let mut options = AppOptions::default();
    if let Some(url) = &params.url { options.fetch.url = url.clone(); }
    if let Some(secs) = params.timeout { options.fetch.timeout = Duration::from_secs(secs); }
    options.export.format = params.format;
    options.export.include_headers = params.include_headers;

    let source: Box<dyn Source> = match &params.html {
        Some(path) => Box::new(FileSource { path: path.clone() }),
        None => Box::new(HttpSource::new(&options.fetch)),
    };

    let mut progress = StderrProgress::new();
    let ds = pipeline::run(source.as_ref(), Utc::now(), Some(&mut progress))
        .wrap_err_with(|| format!("Could not load {}", source.describe()))?;
    if !ds.dropped().is_empty() {
        eprintln!("{} rows skipped while parsing", ds.dropped().count());
    }

    let view = RecordView::new(&ds, &params.query);
    let mut records = view.to_owned_records();
    if let Some(n) = params.top { records.truncate(n); }

    if params.summary {
        print!("{}", summary_text(&Summary::of(&records)));
        return Ok(());
    }

    match &params.out {
        Some(out) => {
            options.export.set_path(out);
            let path = file::write_export(&options.export, &records, Utc::now())?;
            eprintln!("Wrote {} rows to {}", records.len(), path.display());
        }
        None => print!("{}", records_to_string(&records, options.export.format, options.export.include_headers)?),
    }
    Ok(())
}
