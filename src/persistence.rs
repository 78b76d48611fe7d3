// File: src/persistence.rs
use crate::core::loader::{Dictionary, ReversePolicy};
use crate::error::LoadError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{error, info};

/// On-disk form of a snapshot. The reverse index depends on the policy it
/// was built with, so the policy travels with it.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    reverse_policy: ReversePolicy,
    dictionary: Dictionary,
}

/// Writes both indexes and their reverse policy to `path` as bincode. The
/// bytes go to a temp file in the same directory first and are then renamed
/// over the target, so readers never observe a half-written snapshot.
pub fn save_snapshot(
    dictionary: &Dictionary,
    reverse_policy: ReversePolicy,
    path: &Path,
) -> Result<(), LoadError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let state = SerializableState {
            reverse_policy,
            dictionary: dictionary.clone(),
        };
        bincode::serialize_into(&mut writer, &state)
            .map_err(|e| LoadError::Snapshot(e.to_string()))?;
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .map_err(|e| LoadError::Io(e.error))?;
    info!(
        "Wrote dictionary snapshot to {} ({} + {} keys, reverse policy: {})",
        path.display(),
        dictionary.chakma_to_bangla.len(),
        dictionary.bangla_to_chakma.len(),
        reverse_policy
    );
    Ok(())
}

/// Reads a snapshot back. A snapshot built under a different reverse policy
/// than `expected` is rejected rather than served.
pub fn load_snapshot(path: &Path, expected: ReversePolicy) -> Result<Dictionary, LoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState =
        bincode::deserialize_from(reader).map_err(|e| LoadError::Snapshot(e.to_string()))?;

    if state.reverse_policy != expected {
        error!(
            "Snapshot {} uses reverse policy {}, configured policy is {}",
            path.display(),
            state.reverse_policy,
            expected
        );
        return Err(LoadError::Snapshot(format!(
            "snapshot was built with reverse policy '{}' but '{}' is configured",
            state.reverse_policy, expected
        )));
    }

    let dictionary = state.dictionary;
    info!(
        "Loaded dictionary snapshot {} ({} + {} keys)",
        path.display(),
        dictionary.chakma_to_bangla.len(),
        dictionary.bangla_to_chakma.len()
    );
    Ok(dictionary)
}
