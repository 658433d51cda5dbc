//! Scenario file persistence.
//!
//! Each scenario is written to a temporary file inside the target directory
//! and renamed to its final name once fully flushed, so a consumer never sees
//! a half-written scenario under a `scenario-<index>` name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ScenarioError, ScenarioResult};

/// File name prefix of every published scenario.
pub const SCENARIO_FILE_PREFIX: &str = "scenario-";

/// Name of the file holding scenario `index`.
pub fn scenario_file_name(index: usize) -> String {
    format!("{SCENARIO_FILE_PREFIX}{index}")
}

/// Writes scenarios into one target directory.
#[derive(Debug, Clone)]
pub struct ScenarioFileWriter {
    dir: PathBuf,
}

impl ScenarioFileWriter {
    /// Create the target directory if needed and resolve its canonical path.
    pub fn create(target_dir: impl AsRef<Path>) -> ScenarioResult<Self> {
        let target_dir = target_dir.as_ref();
        fs::create_dir_all(target_dir)
            .map_err(|source| ScenarioError::unwritable(target_dir, source))?;
        let dir = fs::canonicalize(target_dir)
            .map_err(|source| ScenarioError::unwritable(target_dir, source))?;
        Ok(Self { dir })
    }

    /// Canonical target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final path of scenario `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(scenario_file_name(index))
    }

    /// Atomically publish `text` as scenario `index`, returning its absolute path.
    ///
    /// An existing file with the same name is replaced as a whole.
    pub fn write(&self, index: usize, text: &str) -> ScenarioResult<PathBuf> {
        let path = self.path_for(index);

        let mut staged = tempfile::Builder::new()
            .prefix(".scenario-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|source| ScenarioError::unwritable(&self.dir, source))?;

        staged
            .write_all(text.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| ScenarioError::unwritable(staged.path(), source))?;

        staged
            .persist(&path)
            .map_err(|err| ScenarioError::unwritable(&path, err.error))?;

        tracing::trace!(index, path = %path.display(), bytes = text.len(), "scenario persisted");
        Ok(path)
    }
}
