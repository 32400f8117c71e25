//! Game metadata for logging and reporting
//!
//! Display-oriented facts about a model that actors and reports can use
//! without knowing the concrete game type.

use serde::{Deserialize, Serialize};

/// Metadata about a game for logs and batch reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "dice")
    pub env_id: String,

    /// Human-readable display name (e.g., "3d6 re-roll")
    pub display_name: String,

    /// Number of enumerated states
    pub num_states: usize,

    /// Number of enumerated actions
    pub num_actions: usize,

    /// Brief description of the rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            num_states: 0,
            num_actions: 0,
            description: String::new(),
        }
    }

    /// Builder method for state and action counts
    pub fn with_counts(mut self, num_states: usize, num_actions: usize) -> Self {
        self.num_states = num_states;
        self.num_actions = num_actions;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of (state, action) pairs a full sweep evaluates
    pub fn state_action_pairs(&self) -> usize {
        self.num_states * self.num_actions
    }
}
