//! Batch generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

/// Default cluster size.
pub const DEFAULT_NODES: usize = 3;
/// Default number of scenarios per batch.
pub const DEFAULT_SCENARIOS: usize = 3;
/// Default number of exploration steps per scenario.
pub const DEFAULT_STEPS: usize = 25;

/// Largest accepted cluster size.
pub const MAX_NODES: usize = 1_000;
/// Largest accepted exploration length.
pub const MAX_STEPS: usize = 1_000_000;

/// Parameters for one batch of scenarios.
///
/// ```rust
/// use raft_scenarios::ScenarioConfig;
///
/// let config = ScenarioConfig::default().with_nodes(5).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Cluster size; node ids are `0..nodes`.
    pub nodes: usize,
    /// Number of scenario files to produce.
    pub scenarios: usize,
    /// Exploration steps per scenario.
    pub steps: usize,
    /// Batch seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Append a `state_all` snapshot right after exploration.
    #[serde(default)]
    pub exploration_snapshot: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            scenarios: DEFAULT_SCENARIOS,
            steps: DEFAULT_STEPS,
            seed: None,
            exploration_snapshot: false,
        }
    }
}

impl ScenarioConfig {
    /// Config with explicit counts and no seed.
    pub fn new(scenarios: usize, nodes: usize, steps: usize) -> Self {
        Self {
            nodes,
            scenarios,
            steps,
            ..Self::default()
        }
    }

    /// Set the cluster size.
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Set the number of scenarios.
    pub fn with_scenarios(mut self, scenarios: usize) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Set the exploration length.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Fix the batch seed for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Emit a `state_all` checkpoint between exploration and convergence.
    pub fn with_exploration_snapshot(mut self, enabled: bool) -> Self {
        self.exploration_snapshot = enabled;
        self
    }

    /// Reject parameters that cannot produce a meaningful batch.
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.nodes < 1 {
            return Err(ScenarioError::invalid("node count must be at least 1"));
        }
        if self.nodes > MAX_NODES {
            return Err(ScenarioError::invalid(format!(
                "node count {} exceeds maximum {}",
                self.nodes, MAX_NODES
            )));
        }
        if self.scenarios < 1 {
            return Err(ScenarioError::invalid("scenario count must be at least 1"));
        }
        if self.steps > MAX_STEPS {
            return Err(ScenarioError::invalid(format!(
                "step count {} exceeds maximum {}",
                self.steps, MAX_STEPS
            )));
        }
        Ok(())
    }
}
