//! Starlink constellation statistics tracker.
//!
//! Scrapes the public constellation statistics table, normalizes it into
//! typed mission records, persists timestamped snapshots in SQLite, and
//! serves a small HTTP surface (scheduler trigger, status, current data,
//! dashboard) for inspection.

pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod scrapers;
pub mod server;
pub mod services;
