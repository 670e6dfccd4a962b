//! Database layer for sehat
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - A records store owning all CRUD/search/aggregate operations
//! - Boundary translation of engine errors into safe sentinel results

pub mod schema;
pub mod store;

pub use store::RecordsStore;
