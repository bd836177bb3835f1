//! Dimension-to-path index of generated level files
//!
//! One `#`-delimited file of `"{rows}x{cols}:{path}"` entries. Keys match
//! exactly, so `1x1` never resolves to the entry for `1x10`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::configuration::{INDEX_KEY_SEPARATOR, RECORD_SEPARATOR};
use crate::io::error::{GameError, Result, WithContext, invalid_parameter, malformed_record};
use crate::io::level_file::split_records;

/// Maps grid dimensions to the level file generated for them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionIndex {
    entries: Vec<(String, PathBuf)>,
}

impl DimensionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup key for a grid size
    pub fn key(rows: usize, cols: usize) -> String {
        format!("{rows}x{cols}")
    }

    /// Parse index file content
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` for an entry without a key separator
    pub fn parse(content: &str) -> Result<Self> {
        let entries = split_records(content)
            .map(|entry| {
                entry
                    .split_once(INDEX_KEY_SEPARATOR)
                    .map(|(key, path)| (key.trim().to_string(), PathBuf::from(path.trim())))
                    .ok_or_else(|| malformed_record(entry, &"missing ':' between key and path"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Read the index at `path`, treating a missing file as empty
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file exists but cannot be read and
    /// `MalformedRecord` if it does not parse
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(error) => Err(GameError::from(error)).with_file(path, "read index"),
        }
    }

    /// Write the index to `path`
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).with_file(path, "write index")
    }

    /// Level file registered for a grid size
    pub fn path_for(&self, rows: usize, cols: usize) -> Option<&Path> {
        let key = Self::key(rows, cols);
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, path)| path.as_path())
    }

    /// Register `path` for a grid size, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the path contains the record separator,
    /// which would split the entry when the index is read back
    pub fn update(&mut self, rows: usize, cols: usize, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if path.to_string_lossy().contains(RECORD_SEPARATOR) {
            return Err(invalid_parameter(
                "path",
                &path.display(),
                &format!("level paths cannot contain '{RECORD_SEPARATOR}'"),
            ));
        }
        let key = Self::key(rows, cols);
        self.entries.retain(|(entry_key, _)| *entry_key != key);
        self.entries.push((key, path));
        Ok(())
    }

    /// Number of registered sizes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no sizes are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File content for this index
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(key, path)| {
                format!(
                    "{key}{INDEX_KEY_SEPARATOR}{}{RECORD_SEPARATOR}",
                    path.display()
                )
            })
            .collect()
    }
}
