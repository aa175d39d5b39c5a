//! Import products from a YAML catalog file.

use std::path::Path;

use tracing::{error, info};

use shopdesk_admin::AdminState;
use shopdesk_admin::error::AppError;
use shopdesk_admin::seed::read_catalog_file;
use shopdesk_admin::services::catalog;
use shopdesk_admin::storage::KeyValueStore;

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `replace` - If true, replace the whole catalog instead of appending
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any product is
/// invalid, or the catalog cannot be saved.
pub fn import_file<S: KeyValueStore>(
    state: &mut AdminState<S>,
    file_path: &Path,
    replace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %file_path.display(), "Loading catalog from file");

    let inputs = read_catalog_file(file_path)?;
    info!(products = inputs.len(), "Parsed catalog");

    let imported = match catalog::import_products(state, inputs, replace) {
        Ok(imported) => imported,
        Err(AppError::Validation(errors)) => {
            error!("Catalog validation failed:");
            for err in errors.errors() {
                error!("  - {err}");
            }
            return Err(format!("{} validation errors found", errors.errors().len()).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Seeding complete!");
    info!("  Products imported: {}", imported.len());
    info!("  Catalog size: {}", state.products().len());
    Ok(())
}
