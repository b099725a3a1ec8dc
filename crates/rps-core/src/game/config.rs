//! Session configuration, fixed at match start

use crate::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who occupies the Secondary position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    #[serde(alias = "computer")]
    VsSynthetic,
    #[serde(alias = "human")]
    VsHuman,
}

impl GameMode {
    /// Scoreboard label for the Secondary position.
    pub fn secondary_label(self) -> &'static str {
        match self {
            GameMode::VsSynthetic => "Computer",
            GameMode::VsHuman => "Player 2",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::VsSynthetic => f.write_str("vs-synthetic"),
            GameMode::VsHuman => f.write_str("vs-human"),
        }
    }
}

impl FromStr for GameMode {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vs-synthetic" | "synthetic" | "computer" => Ok(GameMode::VsSynthetic),
            "vs-human" | "human" => Ok(GameMode::VsHuman),
            _ => Err(ArenaError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: GameMode,
    /// Wins needed to take the match.
    pub target_score: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::VsSynthetic,
            target_score: 3,
        }
    }
}

impl SessionConfig {
    /// Build a validated configuration.
    pub fn new(mode: GameMode, target_score: u32) -> Result<Self, ArenaError> {
        let config = Self { mode, target_score };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.target_score == 0 {
            return Err(ArenaError::InvalidTargetScore(self.target_score));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_aliases() {
        assert_eq!("computer".parse::<GameMode>(), Ok(GameMode::VsSynthetic));
        assert_eq!("Vs-Human".parse::<GameMode>(), Ok(GameMode::VsHuman));
        assert_eq!(
            "online".parse::<GameMode>(),
            Err(ArenaError::UnknownMode("online".to_string()))
        );
    }

    #[test]
    fn test_zero_target_rejected() {
        assert_eq!(
            SessionConfig::new(GameMode::VsHuman, 0),
            Err(ArenaError::InvalidTargetScore(0))
        );
        assert!(SessionConfig::new(GameMode::VsHuman, 5).is_ok());
    }

    #[test]
    fn test_serde_mode_names() {
        let json = serde_json::json!({ "mode": "computer", "target_score": 7 });
        let config: SessionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.mode, GameMode::VsSynthetic);
        assert_eq!(
            serde_json::to_value(GameMode::VsHuman).unwrap(),
            serde_json::json!("vs-human")
        );
    }
}
