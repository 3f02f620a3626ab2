//! Scraper and shot-probability model for basketball-reference.com
//! Shot Finder play-by-play data.
//!
//! The pipeline pulls every paginated results page for one player/season
//! scope, parses each free-text shot description into a typed record,
//! assembles the records into a fixed-schema dataset, and optionally fits
//! a logistic-regression classifier estimating shot-make probability.

pub mod bbref;
pub mod config;
pub mod dataset;
pub mod model;
pub mod pbp;
