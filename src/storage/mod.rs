//! Persistence of the session: pluggable stores and JSON export/import.
//!
//! Every store writes the same document as [`export_json`], so a saved state can be
//! imported elsewhere and vice versa.

mod snapshot;

pub use snapshot::{
    export_json, import_into, import_json, standings_csv, ExportFile, FORMAT_VERSION,
};

use crate::models::{Tournament, TournamentError};
use std::path::{Path, PathBuf};

/// Somewhere to keep the latest full snapshot of a tournament.
pub trait StateStore {
    /// Overwrite the stored snapshot.
    fn save(&mut self, tournament: &Tournament) -> Result<(), TournamentError>;

    /// Latest snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Tournament>, TournamentError>;

    /// Forget the stored snapshot.
    fn clear(&mut self) -> Result<(), TournamentError>;
}

/// Keeps the serialized snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, tournament: &Tournament) -> Result<(), TournamentError> {
        self.data = Some(export_json(tournament)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Tournament>, TournamentError> {
        self.data.as_deref().map(import_json).transpose()
    }

    fn clear(&mut self) -> Result<(), TournamentError> {
        self.data = None;
        Ok(())
    }
}

/// Keeps the snapshot in a JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn save(&mut self, tournament: &Tournament) -> Result<(), TournamentError> {
        let json = export_json(tournament)?;
        std::fs::write(&self.path, json)
            .map_err(|e| TournamentError::Storage(format!("Failed to write: {}", e)))
    }

    fn load(&self) -> Result<Option<Tournament>, TournamentError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TournamentError::Storage(format!("Failed to read: {}", e))),
        };
        import_json(&contents).map(Some)
    }

    fn clear(&mut self) -> Result<(), TournamentError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TournamentError::Storage(format!("Failed to remove: {}", e))),
        }
    }
}
