/// State management module
///
/// This module handles all application state, including:
/// - Catalog records (data.rs)
/// - Loading and owning the catalog (catalog.rs)
/// - Filter criteria and the derived view (filter.rs)
/// - The floor-plan viewer and its gestures (viewer.rs)

pub mod catalog;
pub mod data;
pub mod filter;
pub mod viewer;
