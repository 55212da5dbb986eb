/// State management module
///
/// This module handles all application state, including:
/// - The persisted store of tabs and document records (store.rs)
/// - Shared data structures (data.rs)
/// - On-disk locations for the store file and managed assets (paths.rs)

pub mod data;
pub mod paths;
pub mod store;
