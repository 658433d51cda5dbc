//! Action vocabulary shared with the protocol simulator.
//!
//! Each [`Action`] encodes to exactly one line of comma-separated fields, the
//! first field being the keyword. The simulator treats these lines as its
//! input language, so the encoding is byte-exact:
//!
//! | Line | Fields |
//! |------|--------|
//! | `nodes,<id0>,...,<idN-1>` | ascending ids |
//! | `connect,<a>,<b>` | one unordered link |
//! | `dispatch_all` | deliver in-flight messages |
//! | `periodic_one,<node>,<ms>` | advance one node's timer |
//! | `periodic_all,<ms>` | advance every timer |
//! | `replicate,<tag>,<payload>` | payload may contain spaces and commas |
//! | `state_all` | snapshot every node |
//! | `assert_state_sync` | assert convergence |

use std::fmt;
use std::str::FromStr;

/// Identifier of a simulated node. Ids are dense in `[0, N)`.
pub type NodeId = usize;

/// Log-position tag used by every generated replication request.
pub const LATEST_TAG: &str = "latest";

/// One simulator instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Declare the node set.
    Nodes(Vec<NodeId>),
    /// Connect two nodes with a bidirectional link.
    Connect(NodeId, NodeId),
    /// Deliver every in-flight message.
    DispatchAll,
    /// Advance a single node's timer.
    PeriodicOne {
        /// Node whose timer advances.
        node: NodeId,
        /// Simulated milliseconds.
        ms: u64,
    },
    /// Advance every node's timer.
    PeriodicAll {
        /// Simulated milliseconds.
        ms: u64,
    },
    /// Ask the current leader to replicate a new entry.
    Replicate {
        /// Log-position tag, always [`LATEST_TAG`] for generated scenarios.
        tag: String,
        /// Entry payload.
        payload: String,
    },
    /// Request a snapshot of every node's state.
    StateAll,
    /// Assert that all nodes converged.
    AssertStateSync,
}

impl Action {
    pub const NODES: &'static str = "nodes";
    pub const CONNECT: &'static str = "connect";
    pub const DISPATCH_ALL: &'static str = "dispatch_all";
    pub const PERIODIC_ONE: &'static str = "periodic_one";
    pub const PERIODIC_ALL: &'static str = "periodic_all";
    pub const REPLICATE: &'static str = "replicate";
    pub const STATE_ALL: &'static str = "state_all";
    pub const ASSERT_STATE_SYNC: &'static str = "assert_state_sync";

    /// Replication request at the `latest` log position.
    ///
    /// # Panics
    ///
    /// Panics if `payload` contains a line break, which would split the
    /// action across two lines.
    pub fn replicate_latest(payload: impl Into<String>) -> Self {
        let payload = payload.into();
        assert!(
            !payload.contains(|c: char| c == '\n' || c == '\r'),
            "Replicate payload must be a single line, got {:?}",
            payload
        );
        Action::Replicate {
            tag: LATEST_TAG.to_string(),
            payload,
        }
    }

    /// The leading keyword of this action's encoded line.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Nodes(_) => Self::NODES,
            Action::Connect(..) => Self::CONNECT,
            Action::DispatchAll => Self::DISPATCH_ALL,
            Action::PeriodicOne { .. } => Self::PERIODIC_ONE,
            Action::PeriodicAll { .. } => Self::PERIODIC_ALL,
            Action::Replicate { .. } => Self::REPLICATE,
            Action::StateAll => Self::STATE_ALL,
            Action::AssertStateSync => Self::ASSERT_STATE_SYNC,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            Action::Nodes(ids) => {
                for id in ids {
                    write!(f, ",{id}")?;
                }
                Ok(())
            }
            Action::Connect(a, b) => write!(f, ",{a},{b}"),
            Action::PeriodicOne { node, ms } => write!(f, ",{node},{ms}"),
            Action::PeriodicAll { ms } => write!(f, ",{ms}"),
            Action::Replicate { tag, payload } => write!(f, ",{tag},{payload}"),
            Action::DispatchAll | Action::StateAll | Action::AssertStateSync => Ok(()),
        }
    }
}

/// Errors produced when decoding a scenario line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    /// The line was empty.
    #[error("empty line")]
    Empty,

    /// The keyword is not part of the vocabulary.
    #[error("unknown action keyword: {keyword}")]
    UnknownKeyword {
        /// The unrecognised keyword.
        keyword: String,
    },

    /// The action had the wrong number of fields.
    #[error("{keyword} expects {expected} argument(s), found {found}")]
    Arity {
        /// Action keyword.
        keyword: &'static str,
        /// Expected argument count (minimum, for `nodes`).
        expected: usize,
        /// Actual argument count.
        found: usize,
    },

    /// A numeric field did not parse.
    #[error("{keyword}: invalid number {field:?}")]
    InvalidNumber {
        /// Action keyword.
        keyword: &'static str,
        /// The offending field.
        field: String,
    },
}

fn parse_number<T: FromStr>(keyword: &'static str, field: &str) -> Result<T, ParseActionError> {
    field.parse().map_err(|_| ParseActionError::InvalidNumber {
        keyword,
        field: field.to_string(),
    })
}

fn expect_args(keyword: &'static str, args: &[&str], expected: usize) -> Result<(), ParseActionError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseActionError::Arity {
            keyword,
            expected,
            found: args.len(),
        })
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line.is_empty() {
            return Err(ParseActionError::Empty);
        }

        let (keyword, rest) = match line.split_once(',') {
            Some((keyword, rest)) => (keyword, Some(rest)),
            None => (line, None),
        };

        // The replicate payload is free text and keeps any commas it contains.
        if keyword == Self::REPLICATE {
            let Some((tag, payload)) = rest.and_then(|rest| rest.split_once(',')) else {
                return Err(ParseActionError::Arity {
                    keyword: Self::REPLICATE,
                    expected: 2,
                    found: usize::from(rest.is_some()),
                });
            };
            return Ok(Action::Replicate {
                tag: tag.to_string(),
                payload: payload.to_string(),
            });
        }

        let args: Vec<&str> = rest.map(|rest| rest.split(',').collect()).unwrap_or_default();
        match keyword {
            Self::NODES => {
                if args.is_empty() {
                    return Err(ParseActionError::Arity {
                        keyword: Self::NODES,
                        expected: 1,
                        found: 0,
                    });
                }
                let ids = args
                    .iter()
                    .map(|field| parse_number(Self::NODES, field))
                    .collect::<Result<Vec<NodeId>, _>>()?;
                Ok(Action::Nodes(ids))
            }
            Self::CONNECT => {
                expect_args(Self::CONNECT, &args, 2)?;
                Ok(Action::Connect(
                    parse_number(Self::CONNECT, args[0])?,
                    parse_number(Self::CONNECT, args[1])?,
                ))
            }
            Self::DISPATCH_ALL => {
                expect_args(Self::DISPATCH_ALL, &args, 0)?;
                Ok(Action::DispatchAll)
            }
            Self::PERIODIC_ONE => {
                expect_args(Self::PERIODIC_ONE, &args, 2)?;
                Ok(Action::PeriodicOne {
                    node: parse_number(Self::PERIODIC_ONE, args[0])?,
                    ms: parse_number(Self::PERIODIC_ONE, args[1])?,
                })
            }
            Self::PERIODIC_ALL => {
                expect_args(Self::PERIODIC_ALL, &args, 1)?;
                Ok(Action::PeriodicAll {
                    ms: parse_number(Self::PERIODIC_ALL, args[0])?,
                })
            }
            Self::STATE_ALL => {
                expect_args(Self::STATE_ALL, &args, 0)?;
                Ok(Action::StateAll)
            }
            Self::ASSERT_STATE_SYNC => {
                expect_args(Self::ASSERT_STATE_SYNC, &args, 0)?;
                Ok(Action::AssertStateSync)
            }
            other => Err(ParseActionError::UnknownKeyword {
                keyword: other.to_string(),
            }),
        }
    }
}
