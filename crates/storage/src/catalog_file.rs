use std::path::Path;

use formcoach_domain::Catalog;
use log::{error, info};

/// Load the exercise catalog from a CSV file.
///
/// An unreadable file yields an empty catalog.
#[must_use]
pub fn read_catalog(path: &Path) -> Catalog {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            let catalog = Catalog::parse(&source);
            info!(
                "loaded {} exercises from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        Err(err) => {
            error!("failed to read catalog {}: {err}", path.display());
            Catalog::default()
        }
    }
}
