// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod cache;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod view;

pub mod csv;
pub mod file;
pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;
