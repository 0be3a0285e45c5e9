//! Reading input documents and writing results atomically
//!
//! Plans, cases and reviews are JSON or YAML files; the format is chosen by
//! extension. Results written to disk go through a temp file and a rename so
//! a failed write never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ProfitError;

/// On-disk format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ProfitError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ProfitError::Validation(format!(
                "Unsupported input file {}: expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Read a JSON or YAML document, returning an error if the file doesn't exist
pub fn read_document<T, P>(path: P) -> Result<T, ProfitError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    if !path.exists() {
        return Err(ProfitError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| ProfitError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match format {
        DocumentFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            ProfitError::Json(format!("Failed to parse {}: {}", path.display(), e))
        }),
        DocumentFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            ProfitError::Yaml(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ProfitError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| ProfitError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Write through `write` into a temp file next to `path`, then rename it into place
pub fn write_atomic<F>(path: &Path, write: F) -> Result<(), ProfitError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ProfitError>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ProfitError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| ProfitError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    if let Err(e) = write(&mut writer) {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| ProfitError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ProfitError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ProfitError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
