//! Read-back validation of scenario text.
//!
//! Every scenario is decoded line by line and checked against its expected
//! layout before it is published:
//!
//! - the first line declares `nodes,0,...,n-1`
//! - `connect` lines cover each unordered pair once, in lexicographic order
//! - the priming block is intact
//! - exactly `steps` exploration lines follow, drawn from the exploration
//!   alphabet, with strictly increasing `hello <n>` labels
//! - `n` per-node convergence blocks in ascending node order
//! - a single `assert_state_sync` as the last line, followed by one newline

use crate::action::{Action, ParseActionError, LATEST_TAG};
use crate::config::ScenarioConfig;
use crate::convergence::{per_node_block, priming_block, BLOCK_LEN};
use crate::selector::{TickSampler, EXPLORATION_PAYLOAD_PREFIX};
use crate::topology::TopologyBuilder;

/// Reasons a scenario text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The text does not end with exactly one newline.
    #[error("scenario must end with exactly one trailing newline")]
    TrailingNewline,

    /// A line is empty.
    #[error("line {line}: blank line")]
    BlankLine {
        /// 1-based line number.
        line: usize,
    },

    /// A line failed to decode.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Decoder error.
        #[source]
        source: ParseActionError,
    },

    /// The scenario has the wrong number of lines for its parameters.
    #[error("expected {expected} lines, found {found}")]
    LineCount {
        /// Lines implied by the parameters.
        expected: usize,
        /// Lines present.
        found: usize,
    },

    /// A fixed-position line does not match.
    #[error("line {line}: expected {expected:?}, found {found:?}")]
    Unexpected {
        /// 1-based line number.
        line: usize,
        /// Expected encoded line.
        expected: String,
        /// Actual encoded line.
        found: String,
    },

    /// An exploration line is outside the exploration alphabet.
    #[error("line {line}: {found:?} is not an exploration step")]
    NotExploration {
        /// 1-based line number.
        line: usize,
        /// Actual encoded line.
        found: String,
    },

    /// An exploration tick is outside every duration band.
    #[error("line {line}: tick of {ms}ms outside the exploration bands")]
    TickOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Tick duration.
        ms: u64,
    },

    /// Replication labels are not strictly increasing.
    #[error("line {line}: replication label {found} does not follow {previous}")]
    ReplicationOrder {
        /// 1-based line number.
        line: usize,
        /// Previous label (0 before the first).
        previous: u64,
        /// Offending label.
        found: u64,
    },
}

/// Checks scenario text against the layout implied by its parameters.
#[derive(Debug, Clone)]
pub struct ScenarioValidator {
    nodes: usize,
    steps: usize,
    exploration_snapshot: bool,
    ticks: TickSampler,
}

impl ScenarioValidator {
    /// Validator for `nodes` nodes and `steps` exploration steps.
    pub fn new(nodes: usize, steps: usize) -> Self {
        Self {
            nodes,
            steps,
            exploration_snapshot: false,
            ticks: TickSampler::default(),
        }
    }

    /// Validator matching a batch configuration.
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(config.nodes, config.steps).with_exploration_snapshot(config.exploration_snapshot)
    }

    /// Expect a `state_all` checkpoint after exploration.
    pub fn with_exploration_snapshot(mut self, enabled: bool) -> Self {
        self.exploration_snapshot = enabled;
        self
    }

    /// Total number of lines a valid scenario has.
    pub fn expected_lines(&self) -> usize {
        let topology = 1 + TopologyBuilder::new(self.nodes).link_count();
        let snapshot = usize::from(self.exploration_snapshot);
        topology + priming_block().len() + self.steps + snapshot + self.nodes * BLOCK_LEN + 1
    }

    /// Decode and check `text`, returning the decoded actions.
    pub fn validate(&self, text: &str) -> Result<Vec<Action>, ValidationError> {
        let Some(body) = text.strip_suffix('\n') else {
            return Err(ValidationError::TrailingNewline);
        };
        if body.ends_with('\n') {
            return Err(ValidationError::TrailingNewline);
        }

        let actions = body
            .split('\n')
            .enumerate()
            .map(|(index, line)| {
                if line.is_empty() {
                    return Err(ValidationError::BlankLine { line: index + 1 });
                }
                line.parse::<Action>()
                    .map_err(|source| ValidationError::Parse {
                        line: index + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expected = self.expected_lines();
        if actions.len() != expected {
            return Err(ValidationError::LineCount {
                expected,
                found: actions.len(),
            });
        }

        let mut cursor = 0;
        let expect_exact = |cursor: &mut usize, wanted: Vec<Action>| {
            for action in wanted {
                let found = &actions[*cursor];
                if *found != action {
                    return Err(ValidationError::Unexpected {
                        line: *cursor + 1,
                        expected: action.to_string(),
                        found: found.to_string(),
                    });
                }
                *cursor += 1;
            }
            Ok(())
        };

        expect_exact(&mut cursor, TopologyBuilder::new(self.nodes).build())?;
        expect_exact(&mut cursor, priming_block())?;

        let exploration_end = cursor + self.steps;
        self.check_exploration(&actions, cursor)?;
        cursor = exploration_end;

        if self.exploration_snapshot {
            expect_exact(&mut cursor, vec![Action::StateAll])?;
        }
        for node in 0..self.nodes {
            expect_exact(&mut cursor, per_node_block(node))?;
        }
        expect_exact(&mut cursor, vec![Action::AssertStateSync])?;

        Ok(actions)
    }

    fn check_exploration(&self, actions: &[Action], start: usize) -> Result<(), ValidationError> {
        let mut previous = 0u64;
        for (offset, action) in actions[start..start + self.steps].iter().enumerate() {
            let line = start + offset + 1;
            match action {
                Action::DispatchAll => {}
                Action::PeriodicAll { ms } => {
                    if !self.ticks.covers(*ms) {
                        return Err(ValidationError::TickOutOfRange { line, ms: *ms });
                    }
                }
                Action::Replicate { tag, payload } if tag == LATEST_TAG => {
                    let label = payload
                        .strip_prefix(EXPLORATION_PAYLOAD_PREFIX)
                        .and_then(|rest| rest.strip_prefix(' '))
                        .and_then(|n| n.parse::<u64>().ok())
                        .ok_or_else(|| ValidationError::NotExploration {
                            line,
                            found: action.to_string(),
                        })?;
                    if label <= previous {
                        return Err(ValidationError::ReplicationOrder {
                            line,
                            previous,
                            found: label,
                        });
                    }
                    previous = label;
                }
                other => {
                    return Err(ValidationError::NotExploration {
                        line,
                        found: other.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}
