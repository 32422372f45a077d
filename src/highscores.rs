//! Best-run record
//!
//! A single best run, compared by score, then level, then survival time.
//! Persisted by the shell as a small JSON file.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Best run so far
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighScore {
    pub best_score: u64,
    /// Level reached on the best run
    pub best_level: u32,
    pub best_time_sec: f32,
}

impl From<&RunSummary> for HighScore {
    fn from(summary: &RunSummary) -> Self {
        Self {
            best_score: summary.final_score,
            best_level: summary.final_level,
            best_time_sec: summary.time_survived_sec,
        }
    }
}

impl HighScore {
    /// Lexicographic order: score, then level, then survival time
    pub fn compare(&self, other: &Self) -> Ordering {
        self.best_score
            .cmp(&other.best_score)
            .then(self.best_level.cmp(&other.best_level))
            .then(self.best_time_sec.total_cmp(&other.best_time_sec))
    }

    /// True if `candidate` strictly beats this record
    pub fn is_beaten_by(&self, candidate: &Self) -> bool {
        candidate.compare(self) == Ordering::Greater
    }

    /// Replace the record if `candidate` strictly beats it.
    /// Returns true when the record changed.
    pub fn consider(&mut self, candidate: Self) -> bool {
        if !self.is_beaten_by(&candidate) {
            return false;
        }
        log::info!(
            "New best: score {} (level {}, {:.1}s)",
            candidate.best_score,
            candidate.best_level,
            candidate.best_time_sec
        );
        *self = candidate;
        true
    }

    /// Load the record, starting fresh if the file is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match serde_json::from_str::<HighScore>(&json) {
                Ok(best) => {
                    log::info!("Loaded high score {}", best.best_score);
                    return best;
                }
                Err(e) => log::warn!("Ignoring corrupt high score file: {e}"),
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("High score saved ({})", self.best_score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hs(score: u64, level: u32, time: f32) -> HighScore {
        HighScore {
            best_score: score,
            best_level: level,
            best_time_sec: time,
        }
    }

    #[test]
    fn test_score_dominates() {
        let mut best = hs(10, 9, 500.0);
        assert!(best.consider(hs(11, 1, 1.0)));
        assert_eq!(best, hs(11, 1, 1.0));
    }

    #[test]
    fn test_level_breaks_score_tie() {
        let mut best = hs(10, 3, 500.0);
        assert!(!best.consider(hs(10, 2, 900.0)));
        assert!(best.consider(hs(10, 4, 1.0)));
        assert_eq!(best.best_level, 4);
    }

    #[test]
    fn test_time_breaks_level_tie() {
        let mut best = hs(10, 3, 60.0);
        assert!(best.consider(hs(10, 3, 60.5)));
        assert!(!best.consider(hs(10, 3, 60.5)));
    }

    #[test]
    fn test_equal_does_not_replace() {
        let mut best = HighScore::default();
        assert!(!best.consider(HighScore::default()));
    }

    #[test]
    fn test_from_summary() {
        let summary = RunSummary {
            time_survived_sec: 42.5,
            kills: 30,
            boss_kills: 1,
            final_score: 50,
            final_level: 4,
            upgrades: vec!["Multi-Shot".to_string()],
        };
        assert_eq!(HighScore::from(&summary), hs(50, 4, 42.5));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&hs(7, 2, 3.5)).unwrap();
        assert_eq!(json, r#"{"bestScore":7,"bestLevel":2,"bestTimeSec":3.5}"#);
        let back: HighScore = serde_json::from_str(r#"{"bestScore":7}"#).unwrap();
        assert_eq!(back, hs(7, 0, 0.0));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir()
            .join(format!("arena_survivor_hs_{}.json", std::process::id()));
        hs(99, 5, 120.0).save_to(&path).unwrap();
        assert_eq!(HighScore::load_from(&path), hs(99, 5, 120.0));
        let _ = std::fs::remove_file(&path);
        assert_eq!(HighScore::load_from(&path), HighScore::default());
    }
}
