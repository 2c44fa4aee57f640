//! Storage initialization
//!
//! First-run setup: directories, empty record files and default settings.

use crate::config::paths::PocketbookPaths;
use crate::config::settings::Settings;
use crate::error::PocketbookError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing record files are left untouched.
pub fn initialize_storage(paths: &PocketbookPaths) -> Result<(), PocketbookError> {
    paths.ensure_directories()?;

    let empty_files = [
        (paths.expenses_file(), serde_json::json!({ "expenses": [] })),
        (paths.budgets_file(), serde_json::json!({ "budgets": [] })),
        (paths.shared_file(), serde_json::json!({ "shared_expenses": [] })),
    ];

    for (path, empty) in &empty_files {
        if !path.exists() {
            write_json_atomic(path, empty)?;
            tracing::info!(path = %path.display(), "created record file");
        }
    }

    if !paths.is_initialized() {
        Settings::default().save(paths)?;
    }

    Ok(())
}
