// src/gui/actions/export.rs
use std::path::{ Path, PathBuf };

use chrono::Utc;

use crate::{ file, gui::app::App };
use super::visible_records;

/// Apply a pending edit of the output text field to ExportOptions.
pub fn commit_out_path(app: &mut App) {
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!("Export: Out path set → {}", app.out_path_text);
        app.out_path_dirty = false;
    }
}

pub fn export(app: &mut App) {
    commit_out_path(app);

    let Some(records) = visible_records(app) else {
        app.status("Nothing to export (no data loaded)");
        logd!("Export: Clicked, but there's no dataset");
        return;
    };
    if records.is_empty() {
        app.status("Nothing to export");
        logd!("Export: Clicked, but the view is empty");
        return;
    }

    logf!(
        "Export: Begin rows={} format={:?} headers={}",
        records.len(),
        app.state.options.export.format,
        app.state.options.export.include_headers
    );

    match file::write_export(&app.state.options.export, &records, Utc::now()) {
        Ok(path) => {
            logf!("Export: OK {}", path.display());
            app.status(format!("Exported {} rows to {}", records.len(), path.display()));
        }
        Err(e) => {
            loge!("Export: Error: {e}");
            app.status(format!("Export error: {e}"));
        }
    }
}

/// Open the output folder in the system file explorer.
pub fn open_output_folder(app: &mut App) {
    commit_out_path(app);

    let folder = find_nearest_existing_parent(app.state.options.export.dir());
    let absolute_folder = match std::fs::canonicalize(&folder) {
        Ok(abs_path) => abs_path,
        Err(e) => {
            let msg = format!("Cannot resolve folder path: {e}");
            loge!("{msg}");
            app.status(msg);
            return;
        }
    };

    if let Err(e) = open_folder_in_explorer(&absolute_folder) {
        loge!("Failed to open folder: {e}");
        app.status(format!("Failed to open folder: {e}"));
    } else {
        logf!("Opened folder: {}", absolute_folder.display());
    }
}

/// Walk up until an existing directory is found; falls back to ".".
fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    loop {
        if current.is_dir() {
            return current;
        }
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent.to_path_buf(),
            _ => return PathBuf::from("."),
        }
    }
}

fn open_folder_in_explorer(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    let cmd = "explorer";
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(target_os = "linux")]
    let cmd = "xdg-open";

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        std::process::Command::new(cmd)
            .arg(path)
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("Failed to spawn {cmd}: {e}"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = path;
        Err(s!("Opening folders not supported on this platform"))
    }
}
