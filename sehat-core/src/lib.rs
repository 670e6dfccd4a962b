//! # sehat-core
//!
//! Core library for sehat - a village community health records system.
//!
//! This library provides:
//! - Domain types for residents, visits, and follow-up records
//! - The Records Store over SQLite, with schema migrations
//! - Aggregate analytics for program dashboards
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! All records hang off the resident register:
//! - **Register:** residents keyed by a stable `VH-YYYY-NNNN` id
//! - **Timelines:** append-only visits and per-domain follow-up records
//! - **Roll-ups:** demographics, trends, and risk lists derived on demand
//!
//! ## Example
//!
//! ```rust,no_run
//! use sehat_core::{Config, RecordsStore};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Open the records database
//! let store = RecordsStore::open(&config.database_path()).expect("failed to open database");
//! store.migrate().expect("failed to run migrations");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::RecordsStore;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod clinical;
pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod logging;
pub mod types;
