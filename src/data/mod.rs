//! Data layer
//!
//! Immutable table snapshots, order-preserving filtered views over them,
//! and the providers that fetch them.

pub mod data_provider;
pub mod data_view;
pub mod datatable;
pub mod postgres_provider;
