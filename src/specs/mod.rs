// src/specs/mod.rs
//! # Page scrapers
//!
//! Page-specific scraping rules. Each module encodes *where the ground
//! truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a fetched document (no networking).
//! - **Signature checks** that prove we are reading the right table, so a
//!   page redesign fails loudly instead of shifting fields.
//! - **Light shaping** into raw records (column → cell text).
//!
//! ## What does **not** live here
//! - Fetching (`core::net`), typing/cleaning (`normalize`), caching (`cache`).
//! - GUI concerns, filtering, or export formatting.
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → cache::DatasetCache → pipeline::run → specs::companies::extract
//!                                                 ↘ normalize::normalize_rows
//! ```
//!
//! ## Testing notes
//! Specs are tested **offline** against saved HTML (`tests/fixtures/`).
pub mod companies;
