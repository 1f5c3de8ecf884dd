//! Persistent score-matrix cache.
//!
//! The store is a key-value map from controller key to the last matrix computed
//! for it. Values are read and written whole; the JSON file holds every entry.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ScoreMatrix;
use crate::error::AppError;

/// On-disk form of a score matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMatrix {
    pub controller: String,
    pub steps: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
    pub computed_at: DateTime<Utc>,
}

impl StoredMatrix {
    pub fn from_matrix(controller: &str, matrix: &ScoreMatrix) -> Self {
        Self {
            controller: controller.to_string(),
            steps: matrix.steps().to_vec(),
            rows: matrix.rows(),
            computed_at: Utc::now(),
        }
    }

    pub fn to_matrix(&self) -> Result<ScoreMatrix, AppError> {
        ScoreMatrix::from_rows(self.steps.clone(), self.rows.clone()).map_err(|e| {
            AppError::data(format!("Stored matrix for '{}' is malformed: {e}", self.controller))
        })
    }
}

/// Whole-value key-value storage for score matrices.
pub trait MatrixStore {
    fn load(&self, key: &str) -> Result<Option<StoredMatrix>, AppError>;
    fn save(&mut self, key: &str, value: &StoredMatrix) -> Result<(), AppError>;
}

/// Load `key` or fail: a cached run has no fallback to recomputation.
pub fn load_required(store: &dyn MatrixStore, key: &str) -> Result<StoredMatrix, AppError> {
    store
        .load(key)?
        .ok_or_else(|| AppError::missing(format!("No cached matrix for '{key}'; run without --cached first.")))
}

/// A single JSON document holding every entry.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, StoredMatrix>, AppError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AppError::input(format!(
                    "Failed to open cache '{}': {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AppError::data(format!("Invalid cache file '{}': {e}", self.path.display()))
        })
    }
}

impl MatrixStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<StoredMatrix>, AppError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &StoredMatrix) -> Result<(), AppError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::input(format!("Failed to create cache dir '{}': {e}", parent.display()))
            })?;
        }
        let file = File::create(&self.path).map_err(|e| {
            AppError::input(format!("Failed to create cache '{}': {e}", self.path.display()))
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &all)
            .map_err(|e| AppError::input(format!("Failed to write cache: {e}")))?;
        writer
            .flush()
            .map_err(|e| AppError::input(format!("Failed to write cache: {e}")))
    }
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoredMatrix>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MatrixStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<StoredMatrix>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &StoredMatrix) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
