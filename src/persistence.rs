// File: src/persistence.rs
use crate::core::types::ClassTable;
use crate::error::{LoadError, SaveError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File name suffix that marks a persisted classifier in the data directory.
pub const MODEL_FILE_EXTENSION: &str = "bc";

/// The serializable state of one classifier.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    classes: ClassTable,
}

#[derive(serde::Serialize)]
struct SerializableStateRef<'a> {
    classes: &'a ClassTable,
}

/// Writes the whole table to `path`, replacing any previous file atomically.
pub fn save_to_disk(classes: &ClassTable, path: &Path) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_err)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_err)?;
    let mut writer = BufWriter::new(&temp_file);

    bincode::serialize_into(&mut writer, &SerializableStateRef { classes }).map_err(|source| {
        SaveError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_err)?;
    drop(writer);

    temp_file.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<ClassTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let state: SerializableState =
        bincode::deserialize_from(reader).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(state.classes)
}
