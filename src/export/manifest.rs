//! JSON manifest of every operation a run performed

use crate::config::Settings;
use crate::error::{MirrorError, Result};
use crate::types::Operation;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Manifest schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level manifest structure
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Schema version for forward compatibility
    pub version: String,
    pub metadata: ManifestMetadata,
    /// Operations in completion order
    pub operations: Vec<Operation>,
}

#[derive(Debug, Serialize)]
pub struct ManifestMetadata {
    /// trackmirror version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,
    pub dry_run: bool,
    pub operation_count: usize,
}

/// Write the manifest to `output_path`
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
pub fn write_manifest(operations: &[Operation], settings: &Settings, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| MirrorError::output_error(output_path, e))?;
    let writer = BufWriter::new(file);

    let manifest = Manifest {
        version: SCHEMA_VERSION.to_string(),
        metadata: ManifestMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            input: settings.input.clone(),
            output: settings.output.clone(),
            target_format: settings.target_format.clone(),
            dry_run: settings.dry_run,
            operation_count: operations.len(),
        },
        operations: operations.to_vec(),
    };

    serde_json::to_writer_pretty(writer, &manifest).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        MirrorError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        MirrorError::output_error(output_path, e)
    })?;

    info!("Wrote manifest to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationKind;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        let operations = vec![
            Operation::new(OperationKind::Mkdir, "lib/Album", "out/album"),
            Operation::new(OperationKind::Convert, "lib/Album/a.flac", "out/album/1_a.mp3"),
        ];
        let settings = Settings {
            target_format: Some("mp3".into()),
            ..Settings::default()
        };

        write_manifest(&operations, &settings, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["metadata"]["operation_count"], 2);
        assert_eq!(json["metadata"]["target_format"], "mp3");
        assert_eq!(json["operations"][0]["kind"], "mkdir");
        assert_eq!(json["operations"][1]["destination"], "out/album/1_a.mp3");
        assert_eq!(json["operations"][1]["kind"], "convert");
        assert!(!dir.path().join("manifest.json.tmp").exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("manifest.json");
        let result = write_manifest(&[], &Settings::default(), &path);
        assert!(matches!(result, Err(MirrorError::OutputError { .. })));
    }
}
