//! In-memory timetable lookup loaded from JSON.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{LineId, TimetableEntry};

use super::error::StoreError;

/// A JSON file holds either one line or a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimetableFile {
    Many(Vec<TimetableEntry>),
    One(Box<TimetableEntry>),
}

impl TimetableFile {
    fn into_entries(self) -> Vec<TimetableEntry> {
        match self {
            TimetableFile::Many(entries) => entries,
            TimetableFile::One(entry) => vec![*entry],
        }
    }
}

/// All known lines, keyed by id.
///
/// Entries are validated structurally on load. Departure strings are left
/// raw and parsed when a slice is aggregated.
#[derive(Debug, Clone, Default)]
pub struct TimetableStore {
    lines: BTreeMap<LineId, Arc<TimetableEntry>>,
}

impl TimetableStore {
    /// Build a store from already-parsed entries.
    pub fn from_entries(
        entries: impl IntoIterator<Item = TimetableEntry>,
    ) -> Result<Self, StoreError> {
        let mut lines = BTreeMap::new();
        for entry in entries {
            entry.validate().map_err(|reason| StoreError::Invalid {
                line: entry.line_id.clone(),
                reason,
            })?;
            let id = entry.line_id.clone();
            if lines.insert(id.clone(), Arc::new(entry)).is_some() {
                return Err(StoreError::DuplicateLine(id));
            }
        }
        Ok(Self { lines })
    }

    /// Load from a JSON file, or from every `*.json` file in a directory.
    ///
    /// Each file holds one entry or an array of entries.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let entries = if path.is_dir() {
            load_dir(path)?
        } else {
            load_file(path)?
        };

        let store = Self::from_entries(entries)?;
        info!(path = %path.display(), lines = store.len(), "loaded timetables");
        Ok(store)
    }

    pub fn get(&self, id: &LineId) -> Option<Arc<TimetableEntry>> {
        self.lines.get(id).cloned()
    }

    /// All lines ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Arc<TimetableEntry>> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn load_file(path: &Path) -> Result<Vec<TimetableEntry>, StoreError> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: TimetableFile = serde_json::from_str(&json).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let entries = file.into_entries();
    debug!(path = %path.display(), lines = entries.len(), "read timetable file");
    Ok(entries)
}

fn load_dir(dir: &Path) -> Result<Vec<TimetableEntry>, StoreError> {
    let io_err = |source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    // Directory iteration order is unspecified
    paths.sort();

    let mut entries = Vec::new();
    for path in paths {
        entries.extend(load_file(&path)?);
    }
    Ok(entries)
}
