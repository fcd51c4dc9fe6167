//! Bounded conversation history.
//!
//! The log keeps turns in insertion order and never grows past its
//! configured capacity: once an append overflows, the oldest turns are
//! dropped so only the most recent ones remain.

use parley_core::Turn;
use tracing::debug;

use crate::HistoryError;

/// Number of turns a session keeps by default.
pub const DEFAULT_MAX_TURNS: usize = 50;

/// Configuration for conversation history management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of turns kept per session
    pub max_turns: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl HistoryConfig {
    /// Create a config with a specific turn limit.
    #[must_use]
    pub const fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }
}

/// Ordered, capacity-bounded sequence of turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    turns: Vec<Turn>,
    config: HistoryConfig,
}

impl HistoryLog {
    #[must_use]
    pub const fn new(config: HistoryConfig) -> Self {
        Self {
            turns: Vec::new(),
            config,
        }
    }

    /// Wrap turns loaded from a session.
    ///
    /// Stored logs written under a larger capacity are cut down to the
    /// current one, keeping the newest turns.
    #[must_use]
    pub fn from_turns(turns: Vec<Turn>, config: HistoryConfig) -> Self {
        let mut log = Self { turns, config };
        log.enforce_capacity();
        log
    }

    /// Append a turn, returning how many old turns were discarded.
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.enforce_capacity()
    }

    /// Remove the turn at `index` in the current ordering.
    ///
    /// Out-of-range indices, negative ones included, leave the log untouched.
    pub fn remove(&mut self, index: i64) -> Result<Turn, HistoryError> {
        let len = self.turns.len();
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(self.turns.remove(i)),
            _ => Err(HistoryError::InvalidIndex { index, len }),
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn enforce_capacity(&mut self) -> usize {
        let excess = self.turns.len().saturating_sub(self.config.max_turns);
        if excess > 0 {
            self.turns.drain(..excess);
            debug!(
                "Dropped {excess} oldest turn(s), keeping {}",
                self.turns.len()
            );
        }
        excess
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}
