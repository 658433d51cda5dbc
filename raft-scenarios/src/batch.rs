//! Batch generation of scenario files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::ScenarioConfig;
use crate::error::{ScenarioError, ScenarioResult};
use crate::random::SeededRandomProvider;
use crate::scenario::ScenarioComposer;
use crate::validate::ScenarioValidator;
use crate::writer::ScenarioFileWriter;

/// One published scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioEntry {
    /// Index within the batch.
    pub index: usize,
    /// Canonical absolute path of the file.
    pub path: PathBuf,
}

/// Scenarios produced by one batch, ordered by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSet {
    /// Seed the batch was generated from.
    pub seed: u64,
    entries: Vec<ScenarioEntry>,
}

impl ScenarioSet {
    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioEntry> {
        self.entries.iter()
    }

    /// Paths in index order.
    pub fn paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|entry| entry.path.as_path()).collect()
    }

    /// Path of scenario `index`.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(|entry| entry.path.as_path())
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ScenarioSet {
    type Item = ScenarioEntry;
    type IntoIter = std::vec::IntoIter<ScenarioEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Composes, validates and writes every scenario of a batch.
///
/// The batch seed (configured or drawn from entropy) seeds a batch generator,
/// from which each scenario forks its own generator in index order. The same
/// seed therefore reproduces every file byte for byte, regardless of the
/// target directory.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    config: ScenarioConfig,
}

impl BatchDriver {
    /// Driver for `config`.
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// The batch configuration.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Generate the batch into `target_dir`.
    ///
    /// Parameters are validated before the directory is touched. Any write or
    /// validation failure aborts the batch; files already published for
    /// earlier indices are left in place.
    #[instrument(skip(self, target_dir), fields(nodes = self.config.nodes, steps = self.config.steps))]
    pub fn generate(&self, target_dir: impl AsRef<Path>) -> ScenarioResult<ScenarioSet> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let writer = ScenarioFileWriter::create(target_dir)?;
        info!(
            seed,
            scenarios = self.config.scenarios,
            dir = %writer.dir().display(),
            "generating scenarios"
        );

        let batch_random = SeededRandomProvider::new(seed);
        let composer = ScenarioComposer::from_config(&self.config);
        let validator = ScenarioValidator::from_config(&self.config);

        let mut entries = Vec::with_capacity(self.config.scenarios);
        for index in 0..self.config.scenarios {
            let random = batch_random.fork();
            let text = composer.compose(&random).to_string();
            validator
                .validate(&text)
                .map_err(|source| ScenarioError::Validation { index, source })?;

            let path = writer.write(index, &text)?;
            debug!(index, scenario_seed = random.seed(), path = %path.display(), "scenario written");
            entries.push(ScenarioEntry { index, path });
        }

        info!(seed, written = entries.len(), "scenario batch complete");
        Ok(ScenarioSet { seed, entries })
    }
}

/// Generate `scenarios` scenarios of `nodes` nodes and `steps` exploration
/// steps into `target_dir`, returning their paths in index order.
pub fn generate(
    target_dir: impl AsRef<Path>,
    scenarios: usize,
    nodes: usize,
    steps: usize,
) -> ScenarioResult<ScenarioSet> {
    BatchDriver::new(ScenarioConfig::new(scenarios, nodes, steps)).generate(target_dir)
}
