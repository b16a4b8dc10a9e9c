// src/pipeline.rs
//
// fetch → extract → normalize, one linear pass.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{ DateTime, Utc };

use crate::{
    config::options::FetchOptions,
    core::net,
    error::{ NetworkError, PipelineError, SchemaError },
    model::Dataset,
    normalize::normalize_rows,
    progress::Progress,
    specs::companies,
};

/// Where the raw document comes from. The cache and tests depend on this
/// seam, not on HTTP.
pub trait Source {
    fn fetch_document(&self) -> Result<String, NetworkError>;

    /// Human-readable origin for logs and status lines.
    fn describe(&self) -> String;
}

/// Production source: one GET to the article.
#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Self {
        Self {
            url: opts.url.clone(),
            user_agent: opts.user_agent.clone(),
            timeout: opts.timeout,
        }
    }
}

impl Source for HttpSource {
    fn fetch_document(&self) -> Result<String, NetworkError> {
        net::http_get(&self.url, &self.user_agent, self.timeout)
    }

    fn describe(&self) -> String { self.url.clone() }
}

/// A saved copy of the page (offline runs, fixtures).
#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl Source for FileSource {
    fn fetch_document(&self) -> Result<String, NetworkError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| NetworkError::Body(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String { self.path.display().to_string() }
}

/// Parse an already-fetched document into a dataset stamped `fetched_at`.
pub fn build_dataset(doc: &str, fetched_at: DateTime<Utc>) -> Result<Dataset, SchemaError> {
    let table = companies::extract(doc)?;
    let total = table.rows.len();
    let normalized = normalize_rows(&table.rows);

    if normalized.records.is_empty() {
        return Err(SchemaError::NoRows { rows: total });
    }
    Ok(Dataset::new(normalized.records, fetched_at, normalized.report))
}

/// Run the whole pipeline once. Exactly one `fetch_document` call.
pub fn run(
    source: &dyn Source,
    now: DateTime<Utc>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Dataset, PipelineError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(3);
        p.log(&format!("Fetching {}…", source.describe()));
    }
    logf!("Pipeline: fetch {}", source.describe());

    let doc = source.fetch_document().inspect_err(|e| loge!("Pipeline: fetch failed: {e}"))?;
    if let Some(p) = progress.as_deref_mut() {
        p.stage_done("fetch");
        p.log("Parsing table…");
    }
    if let Some(title) = companies::page_title(&doc) {
        logd!("Pipeline: page title {title:?}");
    }

    let ds = build_dataset(&doc, now).inspect_err(|e| loge!("Pipeline: {e}"))?;
    if let Some(p) = progress.as_deref_mut() {
        p.stage_done("extract");
        p.stage_done("normalize");
        p.finish();
    }

    logf!("Pipeline: OK rows={} dropped={}", ds.len(), ds.dropped().count());
    Ok(ds)
}
