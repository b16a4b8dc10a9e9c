// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use chrono::{ DateTime, Utc };

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub cache: CacheOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(SOURCE_URL),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub ttl: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(CACHE_TTL_SECS) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv  => "csv",
            ExportFormat::Tsv  => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats; `None` for JSON.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv  => Some(','),
            ExportFormat::Tsv  => Some('\t'),
            ExportFormat::Json => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv"  => Some(ExportFormat::Csv),
            "tsv"  => Some(ExportFormat::Tsv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Final file path. With no user-chosen file name the name is
    /// `<stem>_<stamp>.<ext>`, stamped with `at`.
    pub fn out_path(&self, at: DateTime<Utc>) -> PathBuf {
        match &self.out_path.file_name {
            Some(name) => self.out_path.dir.join(name),
            None => {
                let stamp = at.format(FILE_STAMP_FORMAT).to_string();
                self.out_path.dir.join(join!(DEFAULT_FILE_STEM, "_", &stamp, ".", self.format.ext()))
            }
        }
    }

    pub fn dir(&self) -> &Path { &self.out_path.dir }

    /// Parse GUI/CLI text into dir + file name.
    /// A trailing separator or an existing directory means "directory only",
    /// which keeps the generated file name. A user-typed extension is kept as is.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            self.out_path = OutputPath::default();
            return;
        }

        let p = Path::new(s);
        if looks_like_dir_hint(s) || p.is_dir() {
            self.out_path.dir = p.to_path_buf();
            self.out_path.file_name = None;
            return;
        }

        self.out_path.dir = p.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.out_path.file_name = p.file_name().map(|n| n.to_os_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    /// Full file name including extension; `None` = generated
    file_name: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_name: None,
        }
    }
}

fn looks_like_dir_hint(s: &str) -> bool {
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn default_name_is_timestamped_and_follows_format() {
        let mut opts = ExportOptions::default();
        let p = opts.out_path(at());
        assert_eq!(p, PathBuf::from("out").join("us_companies_revenue_20240305_140709.csv"));

        opts.format = ExportFormat::Json;
        assert!(opts.out_path(at()).to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn user_extension_survives_format_change() {
        let mut opts = ExportOptions::default();
        opts.set_path("reports/companies.txt");
        opts.format = ExportFormat::Tsv;
        assert_eq!(opts.out_path(at()), PathBuf::from("reports").join("companies.txt"));
        assert!(opts.out_path.file_name.is_some());
    }

    #[test]
    fn trailing_separator_keeps_generated_name() {
        let mut opts = ExportOptions::default();
        opts.set_path("exports/");
        assert!(opts.out_path.file_name.is_none());
        assert_eq!(opts.dir(), Path::new("exports/"));
    }

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::parse("TSV"), Some(ExportFormat::Tsv));
        assert_eq!(ExportFormat::parse("xml"), None);
    }
}
