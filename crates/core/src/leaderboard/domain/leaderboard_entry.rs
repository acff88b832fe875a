use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(username: impl Into<String>, score: u32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }
}
