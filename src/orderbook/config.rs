//! Construction-time configuration for an order book.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};

/// Number of levels per side published in snapshots unless configured otherwise.
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 10;

/// What `add_order` does when the id is already resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Fail with [`OrderBookError::DuplicateOrderId`] and leave the book untouched.
    #[default]
    Reject,
    /// Cancel the resting order, then insert the new one at the back of its level.
    Replace,
}

/// How `modify_order` treats time priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModifyPolicy {
    /// Every modification is a cancel followed by a fresh add.
    #[default]
    CancelReplace,
    /// A size decrease keeps the queue position; an increase is cancel-replace.
    RetainPriorityOnDecrease,
}

/// Settings for a single instrument book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Instrument symbol, used in logs and snapshots.
    pub symbol: String,
    pub duplicate_policy: DuplicatePolicy,
    pub modify_policy: ModifyPolicy,
    /// Levels per side captured in published snapshots.
    pub snapshot_depth: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            symbol: "UNKNOWN".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            modify_policy: ModifyPolicy::default(),
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }
}

impl BookConfig {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_modify_policy(mut self, policy: ModifyPolicy) -> Self {
        self.modify_policy = policy;
        self
    }

    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        let config: BookConfig =
            serde_json::from_str(data).map_err(|error| OrderBookError::InvalidConfig {
                message: error.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.symbol.trim().is_empty() {
            return Err(OrderBookError::InvalidConfig {
                message: "symbol must not be empty".to_string(),
            });
        }
        if self.snapshot_depth == 0 {
            return Err(OrderBookError::InvalidConfig {
                message: "snapshot_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
