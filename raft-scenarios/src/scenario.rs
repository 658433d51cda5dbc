//! Scenario composition.
//!
//! A scenario is the concatenation of:
//!
//! 1. the topology declaration ([`TopologyBuilder`])
//! 2. the fixed priming block ([`priming_block`])
//! 3. `steps` randomized exploration actions ([`WeightedStepSelector`])
//! 4. an optional `state_all` checkpoint
//! 5. the convergence epilogue ([`ConvergencePhaseBuilder`])
//!
//! Composition is a pure function of the parameters and the random provider.

use std::fmt;
use std::ops::Range;

use crate::action::Action;
use crate::config::ScenarioConfig;
use crate::convergence::{priming_block, ConvergencePhaseBuilder, ConvergenceState};
use crate::random::RandomProvider;
use crate::selector::WeightedStepSelector;
use crate::topology::TopologyBuilder;

/// Section of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `nodes` and `connect` lines.
    Topology,
    /// Fixed leader-seeding block.
    Priming,
    /// Randomized steps.
    Exploration,
    /// Optional checkpoint after exploration.
    Snapshot,
    /// Per-node convergence blocks.
    Convergence,
    /// The closing `assert_state_sync`.
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PhaseSpan {
    phase: Phase,
    lines: Range<usize>,
}

/// Ordered, append-only action script.
///
/// `Display` renders one action per line with a single trailing newline,
/// which is the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    actions: Vec<Action>,
    spans: Vec<PhaseSpan>,
}

impl Scenario {
    /// Empty scenario.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `actions` to the end of `phase`.
    ///
    /// Consecutive appends to the same phase extend one span.
    pub fn append(&mut self, phase: Phase, actions: impl IntoIterator<Item = Action>) {
        let start = self.actions.len();
        self.actions.extend(actions);
        let end = self.actions.len();

        match self.spans.last_mut() {
            Some(span) if span.phase == phase => span.lines.end = end,
            _ => self.spans.push(PhaseSpan {
                phase,
                lines: start..end,
            }),
        }
    }

    /// All actions in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions (lines).
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Line range occupied by `phase`, if present.
    pub fn phase_range(&self, phase: Phase) -> Option<Range<usize>> {
        self.spans
            .iter()
            .find(|span| span.phase == phase)
            .map(|span| span.lines.clone())
    }

    /// Actions of `phase`; empty if the phase is absent.
    pub fn phase(&self, phase: Phase) -> &[Action] {
        self.phase_range(phase)
            .map(|range| &self.actions[range])
            .unwrap_or(&[])
    }

    /// Phases in emission order.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.spans.iter().map(|span| span.phase)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{action}")?;
        }
        Ok(())
    }
}

/// Builds scenarios for a fixed cluster size and exploration length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioComposer {
    nodes: usize,
    steps: usize,
    exploration_snapshot: bool,
}

impl ScenarioComposer {
    /// Composer for `nodes` nodes and `steps` exploration steps.
    pub fn new(nodes: usize, steps: usize) -> Self {
        Self {
            nodes,
            steps,
            exploration_snapshot: false,
        }
    }

    /// Composer matching a batch configuration.
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(config.nodes, config.steps).with_exploration_snapshot(config.exploration_snapshot)
    }

    /// Emit a `state_all` checkpoint after exploration.
    pub fn with_exploration_snapshot(mut self, enabled: bool) -> Self {
        self.exploration_snapshot = enabled;
        self
    }

    /// Compose one scenario, drawing exploration steps from `random`.
    ///
    /// A fresh selector is used per call, so replication labels restart at
    /// `hello 1` in every scenario.
    pub fn compose<R: RandomProvider>(&self, random: &R) -> Scenario {
        let mut scenario = Scenario::new();

        scenario.append(Phase::Topology, TopologyBuilder::new(self.nodes).build());
        scenario.append(Phase::Priming, priming_block());
        scenario.append(
            Phase::Exploration,
            WeightedStepSelector::new(random).take(self.steps),
        );
        if self.exploration_snapshot {
            scenario.append(Phase::Snapshot, [Action::StateAll]);
        }

        let mut epilogue = ConvergencePhaseBuilder::new(self.nodes);
        while let Some(block) = epilogue.next() {
            let phase = match epilogue.state() {
                ConvergenceState::Final => Phase::Final,
                _ => Phase::Convergence,
            };
            scenario.append(phase, block);
        }

        scenario
    }
}

/// Compose one scenario for `nodes` nodes and `steps` exploration steps.
pub fn compose<R: RandomProvider>(nodes: usize, steps: usize, random: &R) -> Scenario {
    ScenarioComposer::new(nodes, steps).compose(random)
}
