//! # Raft Scenario Synthesis
//!
//! Generates reproducible, line-oriented test scenarios for a consensus
//! protocol simulator (leader election, heartbeats, log replication) running
//! on a fully-connected cluster. The crate only *produces* scenario files; the
//! simulator interprets them.
//!
//! ## Scenario Shape
//!
//! Every scenario has two halves:
//!
//! - **Exploration**: after declaring the topology and seeding a first leader,
//!   a run of randomized steps (message delivery, timer advance, client write)
//!   drives the cluster through varied states.
//! - **Convergence**: a deterministic epilogue gives each node in turn the
//!   chance to win an election and commit a canary entry, then asserts that
//!   all nodes are in sync. The assertion holds no matter what exploration did.
//!
//! ## Determinism
//!
//! All randomness flows through an explicit [`SeededRandomProvider`]. A batch
//! seed reproduces the batch byte for byte:
//!
//! ```no_run
//! use raft_scenarios::{BatchDriver, ScenarioConfig};
//!
//! let set = BatchDriver::new(ScenarioConfig::default().with_seed(42))
//!     .generate("target/scenarios")?;
//! for path in set.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), raft_scenarios::ScenarioError>(())
//! ```

pub mod action;
pub mod batch;
pub mod config;
pub mod convergence;
pub mod error;
pub mod random;
pub mod scenario;
pub mod selector;
pub mod topology;
pub mod validate;
pub mod writer;

pub use action::{Action, NodeId, ParseActionError, LATEST_TAG};
pub use batch::{generate, BatchDriver, ScenarioEntry, ScenarioSet};
pub use config::{ScenarioConfig, DEFAULT_NODES, DEFAULT_SCENARIOS, DEFAULT_STEPS};
pub use convergence::{priming_block, ConvergencePhaseBuilder, ConvergenceState};
pub use error::{ScenarioError, ScenarioResult};
pub use random::{RandomProvider, SeededRandomProvider};
pub use scenario::{compose, Phase, Scenario, ScenarioComposer};
pub use selector::{DurationBand, StepCategory, TickSampler, WeightedStepSelector};
pub use topology::TopologyBuilder;
pub use validate::{ScenarioValidator, ValidationError};
pub use writer::ScenarioFileWriter;
