use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many history entries [`Statistics::formatted_stats`] shows.
pub const RECENT_HISTORY: usize = 10;

/// Append-only turn log plus a score accumulator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    steps_count: usize,
    score: u64,
    history: Vec<String>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, description: &str) {
        self.steps_count += 1;
        self.history
            .push(format!("Step {}: {}", self.steps_count, description));
    }

    pub fn update_score(&mut self, points: i64) -> Result<()> {
        let Ok(points) = u64::try_from(points) else {
            log::error!("Refusing negative score delta {}", points);
            return Err(GameError::InvalidScoreDelta(points));
        };
        self.score = self.score.saturating_add(points);
        Ok(())
    }

    pub fn steps_count(&self) -> usize {
        self.steps_count
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn formatted_stats(&self) -> String {
        let mut out = String::from("Final statistics:\n");
        out.push_str(&format!("Score: {}\n", self.score));
        out.push_str(&format!("Steps: {}\n", self.steps_count));

        if !self.history.is_empty() {
            out.push_str("\nHistory:\n");
            let hidden = self.history.len().saturating_sub(RECENT_HISTORY);
            out.push_str(&self.history[hidden..].join("\n"));
            if hidden > 0 {
                out.push_str(&format!("\n... and {} more steps", hidden));
            }
        }

        out
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
