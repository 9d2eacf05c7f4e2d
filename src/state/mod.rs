/// State management module
///
/// This module handles all application state, including:
/// - The static disease catalog (catalog.rs)
/// - Shared data structures (data.rs)
/// - The analysis session owned by the app (session.rs)

pub mod catalog;
pub mod data;
pub mod session;
