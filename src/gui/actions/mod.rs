// src/gui/actions/mod.rs
//
// Button actions. Layout lives in `components`; these functions do the work,
// update status/logs and mutate `app` as needed.

pub mod copy;
pub mod export;
pub mod refresh;

use crate::{ gui::app::App, model::CompanyRecord };

/// Owned copy of the rows currently on screen, `None` before the first load.
fn visible_records(app: &App) -> Option<Vec<CompanyRecord>> {
    app.view().map(|v| v.to_owned_records())
}
