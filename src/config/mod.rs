//! Configuration module for Pocketbook
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PocketbookPaths;
pub use settings::Settings;
