//! Deterministic priming and convergence phases.
//!
//! A single random timeout during exploration rarely lets a *specific* node
//! win an election and propagate a commit before the scenario ends. The
//! convergence epilogue therefore rotates the opportunity to lead and commit
//! across every node once, in id order. On a fully-connected, fault-free
//! cluster this always reaches a synchronized state, whatever exploration
//! did. The cost is O(N) extra rounds.

use crate::action::{Action, NodeId};

/// Node whose timer is advanced to seed the initial leader.
pub const PRIMING_LEADER: NodeId = 0;
/// Timer advance that makes the priming leader time out.
pub const PRIMING_ELECTION_MS: u64 = 110;
/// Global tick that lets the first heartbeats go out.
pub const PRIMING_SETTLE_MS: u64 = 30;

/// Per-node timer advance that plausibly triggers an election timeout.
pub const ELECTION_TICK_MS: u64 = 100;
/// Global tick between settle deliveries.
pub const SETTLE_TICK_MS: u64 = 10;
/// Number of tick/dispatch rounds after the canary write.
pub const SETTLE_ROUNDS: usize = 2;
/// Payload of the canary write issued by each per-node block.
pub const CANARY_PAYLOAD: &str = "CommitConfirmer";
/// Lines in one per-node block.
pub const BLOCK_LEN: usize = 4 + 2 * SETTLE_ROUNDS;

/// Fixed block run once before exploration so random steps exercise
/// steady-state behaviour rather than only the bootstrap election.
pub fn priming_block() -> Vec<Action> {
    vec![
        Action::PeriodicOne {
            node: PRIMING_LEADER,
            ms: PRIMING_ELECTION_MS,
        },
        Action::DispatchAll,
        Action::PeriodicAll {
            ms: PRIMING_SETTLE_MS,
        },
        Action::DispatchAll,
        Action::StateAll,
    ]
}

/// The block giving `node` its chance to lead and commit.
pub fn per_node_block(node: NodeId) -> Vec<Action> {
    let mut block = Vec::with_capacity(BLOCK_LEN);
    block.push(Action::PeriodicOne {
        node,
        ms: ELECTION_TICK_MS,
    });
    block.push(Action::DispatchAll);
    block.push(Action::replicate_latest(CANARY_PAYLOAD));
    for _ in 0..SETTLE_ROUNDS {
        block.push(Action::PeriodicAll { ms: SETTLE_TICK_MS });
        block.push(Action::DispatchAll);
    }
    block.push(Action::StateAll);
    block
}

/// Position of the epilogue state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceState {
    /// Nothing emitted yet.
    Idle,
    /// The block for this node was emitted last.
    PerNode(NodeId),
    /// The final assertion was emitted.
    Final,
}

/// Emits the convergence epilogue one state at a time.
///
/// `Idle -> PerNode(0) -> ... -> PerNode(n-1) -> Final`. Each call to
/// [`Iterator::next`] advances one state and yields the lines that state
/// emits: [`BLOCK_LEN`] lines per node, then a lone `assert_state_sync`.
#[derive(Debug, Clone)]
pub struct ConvergencePhaseBuilder {
    nodes: usize,
    state: ConvergenceState,
}

impl ConvergencePhaseBuilder {
    /// Epilogue for a cluster of `nodes` nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            state: ConvergenceState::Idle,
        }
    }

    /// The state whose block was emitted last.
    pub fn state(&self) -> ConvergenceState {
        self.state
    }

    fn successor(&self) -> Option<ConvergenceState> {
        match self.state {
            ConvergenceState::Idle if self.nodes > 0 => Some(ConvergenceState::PerNode(0)),
            ConvergenceState::Idle => Some(ConvergenceState::Final),
            ConvergenceState::PerNode(node) if node + 1 < self.nodes => {
                Some(ConvergenceState::PerNode(node + 1))
            }
            ConvergenceState::PerNode(_) => Some(ConvergenceState::Final),
            ConvergenceState::Final => None,
        }
    }

    /// Run the state machine to completion.
    pub fn build(self) -> Vec<Action> {
        let len = self.nodes * BLOCK_LEN + 1;
        let mut actions = Vec::with_capacity(len);
        for block in self {
            actions.extend(block);
        }
        actions
    }
}

impl Iterator for ConvergencePhaseBuilder {
    type Item = Vec<Action>;

    fn next(&mut self) -> Option<Vec<Action>> {
        let next = self.successor()?;
        self.state = next;
        Some(match next {
            ConvergenceState::PerNode(node) => per_node_block(node),
            ConvergenceState::Final => vec![Action::AssertStateSync],
            ConvergenceState::Idle => unreachable!("the state machine never returns to idle"),
        })
    }
}
