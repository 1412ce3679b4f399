use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use verdant_core::catalog::SubstanceCatalog;
use verdant_core::params::SimParams;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse simulation params RON: {0}")]
    ParamsParseError(String),
    #[error("Failed to parse substance catalog RON: {0}")]
    CatalogParseError(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Deserialize any RON document, tagging failures with the caller's variant.
fn parse_ron<T: DeserializeOwned>(
    ron_str: &str,
    on_error: fn(String) -> LoadError,
) -> Result<T, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| on_error(e.to_string()))
}

/// Parse simulation parameters from a RON string. Omitted fields keep defaults.
pub fn load_params_from_str(ron_str: &str) -> Result<SimParams, LoadError> {
    parse_ron(ron_str, LoadError::ParamsParseError)
}

/// Parse a substance catalog from a RON string.
pub fn load_catalog_from_str(ron_str: &str) -> Result<SubstanceCatalog, LoadError> {
    parse_ron(ron_str, LoadError::CatalogParseError)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read and parse simulation parameters from a file.
pub fn load_params_from_path(path: &Path) -> Result<SimParams, LoadError> {
    let params = load_params_from_str(&read_file(path)?)?;
    log::info!("Loaded simulation params from {}", path.display());
    Ok(params)
}

/// Read and parse a substance catalog from a file.
pub fn load_catalog_from_path(path: &Path) -> Result<SubstanceCatalog, LoadError> {
    let catalog = load_catalog_from_str(&read_file(path)?)?;
    log::info!(
        "Loaded substance catalog from {} ({} ids)",
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}
