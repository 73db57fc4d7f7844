//! Loading the catalog from the medication data document.

use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use super::CatalogIndex;
use crate::models::RawMedication;

/// Failure to load the data document. Fatal for the session; never retried.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Data request failed with HTTP status {0}")]
    Status(u16),

    #[error("Malformed medication data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not read medication data: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// The single message shown to the user when loading fails.
    pub fn user_message(&self) -> &'static str {
        "Could not load the medication guide. Check the connection or the data file."
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogIndex {
    /// Parse a JSON array of medication objects and build the catalog.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let raw: Vec<RawMedication> = serde_json::from_str(json).inspect_err(|e| {
            warn!(error = %e, "Medication data is not a valid JSON array");
        })?;
        Ok(Self::build(raw))
    }

    /// Build the catalog from a fetched response.
    ///
    /// A status outside 2xx fails before the body is looked at.
    pub fn from_response(status: u16, body: &str) -> CatalogResult<Self> {
        if !(200..300).contains(&status) {
            warn!(status, "Medication data request failed");
            return Err(CatalogError::Status(status));
        }
        Self::from_json_str(body)
    }

    /// Read and build the catalog from any reader.
    pub fn from_reader<R: Read>(reader: R) -> CatalogResult<Self> {
        let raw: Vec<RawMedication> = serde_json::from_reader(reader).inspect_err(|e| {
            warn!(error = %e, "Medication data is not a valid JSON array");
        })?;
        Ok(Self::build(raw))
    }

    /// Read and build the catalog from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot open medication data");
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
