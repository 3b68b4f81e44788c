//! Win/loss tally
//!
//! Serialized as a two-element array `[wins, losses]`.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Rounds won and lost over the life of the save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct ScoreRecord {
    pub wins: u32,
    pub losses: u32,
}

impl ScoreRecord {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    /// Count one finished round
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins = self.wins.saturating_add(1),
            Outcome::Lose => self.losses = self.losses.saturating_add(1),
        }
    }

    /// Total rounds counted
    pub fn played(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }
}

impl From<[u32; 2]> for ScoreRecord {
    fn from([wins, losses]: [u32; 2]) -> Self {
        Self { wins, losses }
    }
}

impl From<ScoreRecord> for [u32; 2] {
    fn from(record: ScoreRecord) -> Self {
        [record.wins, record.losses]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut scores = ScoreRecord::default();
        scores.record(Outcome::Win);
        scores.record(Outcome::Lose);
        scores.record(Outcome::Lose);
        assert_eq!(scores, ScoreRecord::new(1, 2));
        assert_eq!(scores.played(), 3);
    }

    #[test]
    fn test_json_is_pair_array() {
        let json = serde_json::to_string(&ScoreRecord::new(4, 7)).unwrap();
        assert_eq!(json, "[4,7]");
        let back: ScoreRecord = serde_json::from_str("[4,7]").unwrap();
        assert_eq!(back, ScoreRecord::new(4, 7));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(serde_json::from_str::<ScoreRecord>("[1]").is_err());
        assert!(serde_json::from_str::<ScoreRecord>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<ScoreRecord>("[-1,2]").is_err());
        assert!(serde_json::from_str::<ScoreRecord>(r#"{"wins":1}"#).is_err());
    }
}
