// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, never-mutated record of a retired player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetiredRecord {
    pub id: Uuid,
    pub name: String,
    pub score: i64,
    pub play_time_ms: u64,
}

impl RetiredRecord {
    pub fn new(name: String, score: i64, play_time_seconds: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            score,
            play_time_ms: (play_time_seconds * 1000.0).round() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_play_time_to_milliseconds() {
        let record = RetiredRecord::new("Rex".into(), 42, 5.0004);
        assert_eq!(record.play_time_ms, 5000);
        let record = RetiredRecord::new("Rex".into(), 42, 5.0006);
        assert_eq!(record.play_time_ms, 5001);
    }
}
