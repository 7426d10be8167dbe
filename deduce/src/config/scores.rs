use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoresConfig {
    /// Offer to save a score after every completed challenge
    pub save_enabled: bool,
    /// How many scores the leaderboard shows
    pub leaderboard_size: usize,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            save_enabled: true,
            leaderboard_size: 10,
        }
    }
}
