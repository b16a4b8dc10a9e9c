// src/file.rs

use std::{
    fs,
    path::{ Path, PathBuf },
};

use chrono::{ DateTime, Utc };

use crate::config::options::ExportOptions;
use crate::csv::records_to_string;
use crate::error::ExportError;
use crate::model::CompanyRecord;

/// Write one export file based on ExportOptions (path, headers, format).
/// `at` stamps the generated file name. Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    records: &[CompanyRecord],
    at: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let path = export.out_path(at);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = records_to_string(records, export.format, export.include_headers)?;
    fs::write(&path, contents)?;
    logf!("Export: {} rows -> {}", records.len(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.display().to_string()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ExportFormat;

    fn tmp(name: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("revenue_scrape_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tmp("nested").join("a").join("b");
        let mut opts = ExportOptions::default();
        opts.format = ExportFormat::Json;
        opts.set_path(&format!("{}/", dir.display()));

        let path = write_export(&opts, &[], Utc::now()).unwrap();
        assert!(path.starts_with(&dir));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let base = tmp("clash");
        fs::create_dir_all(&base).unwrap();
        let blocker = base.join("blocker");
        fs::write(&blocker, "x").unwrap();
        assert!(matches!(ensure_directory(&blocker), Err(ExportError::NotADirectory(_))));
    }
}
