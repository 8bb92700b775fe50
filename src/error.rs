//! Fatal configuration errors surfaced before any pipeline runs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("skill catalog directory not found: {}", .0.display())]
    CatalogMissing(PathBuf),

    #[error("failed to read skill catalog at {}: {source}", .path.display())]
    CatalogUnreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("skill catalog is empty; at least one skill is required")]
    EmptyCatalog,
}
