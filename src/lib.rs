//! # RAB Estimator
//!
//! A terminal-based construction cost estimator built around a multi-level
//! Work-Breakdown-Structure (WBS) cost tree.
//!
//! ## Features
//!
//! - Derive Ballpark → Estimates → Detail WBS trees from static catalogs
//! - Compose AHSP unit-price analyses from labor/material/equipment components
//! - Resolve regional and difficulty cost factors by province/city
//! - Project priced RAB trees with per-leaf overrides and bottom-up rollups
//! - Export to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use rab_estimator::catalog::load_project_file;
//! use rab_estimator::engine::rab::project_ballpark;
//!
//! let project = load_project_file("tower.json").expect("Failed to load");
//! let ballpark = project.ballpark_tree();
//! let context = project.pricing_context();
//! let priced = project_ballpark(&ballpark, &context, &project.overrides);
//! println!("Project: {}", project.name);
//! println!("Disciplines: {}", priced.len());
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod ui;
