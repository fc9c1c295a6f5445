//! Manifest discovery and parsing

use crate::config::types::Manifest;
use crate::error::{ArgotError, ConfigError, ConfigResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file names to search for
const MANIFEST_FILE_NAMES: &[&str] = &["argot.yml", "argot.yaml"];

/// Find the manifest by searching the current and parent directories
pub fn find_manifest_file() -> ConfigResult<PathBuf> {
    find_manifest_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the manifest starting from a specific directory
pub fn find_manifest_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in MANIFEST_FILE_NAMES {
            let manifest_path = current_dir.join(file_name);
            searched_paths.push(manifest_path.display().to_string());

            if manifest_path.is_file() {
                return Ok(manifest_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a manifest file
pub fn parse_manifest_file(path: &Path) -> Result<Manifest, ArgotError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_manifest(&contents)
}

/// Parse a manifest from a string
pub fn parse_manifest(yaml: &str) -> Result<Manifest, ArgotError> {
    let manifest: Manifest = serde_yaml::from_str(yaml)?;
    Ok(manifest)
}

/// Parse the manifest found by automatic discovery
pub fn parse_manifest_auto() -> Result<(Manifest, PathBuf), ArgotError> {
    let manifest_path = find_manifest_file()?;
    let manifest = parse_manifest_file(&manifest_path)?;
    Ok((manifest, manifest_path))
}
