//! Session configuration
//!
//! Everything the core needs to know about the player's environment is passed
//! in explicitly through `GameConfig`; nothing is read from ambient state.

use super::session::DEFAULT_MAX_ATTEMPTS;
use crate::core::{Difficulty, Word};

/// Configuration for starting a classic round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Difficulty chosen for this round
    pub difficulty: Option<Difficulty>,
    /// Difficulty remembered from the previous round
    pub last_difficulty: Option<Difficulty>,
    /// Fixed target, e.g. from a shared challenge link
    pub override_target: Option<Word>,
    pub max_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: None,
            last_difficulty: None,
            override_target: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    /// Chosen difficulty, else the last one played, else medium
    #[must_use]
    pub fn effective_difficulty(&self) -> Difficulty {
        self.difficulty
            .or(self.last_difficulty)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_attempts, 6);
        assert_eq!(config.effective_difficulty(), Difficulty::Medium);
    }

    #[test]
    fn chosen_difficulty_beats_last_played() {
        let config = GameConfig {
            difficulty: Some(Difficulty::Hard),
            last_difficulty: Some(Difficulty::Easy),
            ..GameConfig::default()
        };
        assert_eq!(config.effective_difficulty(), Difficulty::Hard);
    }

    #[test]
    fn last_played_used_for_quick_start() {
        let config = GameConfig {
            last_difficulty: Some(Difficulty::Easy),
            ..GameConfig::default()
        };
        assert_eq!(config.effective_difficulty(), Difficulty::Easy);
    }
}
