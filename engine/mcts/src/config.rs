//! Search configuration parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::budget::{CycleLimit, Deadline, FirstOf};

/// Rule used to pick the recommended move once the budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalChoice {
    /// Highest average value for the side to move at the root; ties go to the
    /// more visited child.
    #[default]
    MeanValue,
    /// The same exploration-augmented score used during selection.
    Ucb,
    /// Most visited child; ties go to the better average value.
    MostVisited,
}

impl FromStr for FinalChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "mean_value" | "mean" => Ok(FinalChoice::MeanValue),
            "ucb" => Ok(FinalChoice::Ucb),
            "most_visited" | "visits" => Ok(FinalChoice::MostVisited),
            other => Err(format!(
                "unknown final choice '{}', expected mean_value, ucb or most_visited",
                other
            )),
        }
    }
}

impl fmt::Display for FinalChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FinalChoice::MeanValue => "mean_value",
            FinalChoice::Ucb => "ucb",
            FinalChoice::MostVisited => "most_visited",
        };
        f.write_str(name)
    }
}

/// Configuration for one move decision.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant `c` in the UCB1 bonus `c * sqrt(2 ln N / n)`.
    /// Higher values explore under-sampled columns more.
    pub exploration: f64,

    /// Wall-clock time allowed for one decision.
    pub time_budget: Duration,

    /// Optional cap on completed search cycles. The search stops at whichever
    /// limit is reached first.
    pub max_cycles: Option<u64>,

    /// How the recommended move is picked after the search.
    pub final_choice: FinalChoice,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: 0.8,
            time_budget: Duration::from_millis(3000),
            max_cycles: None,
            final_choice: FinalChoice::MeanValue,
        }
    }
}

impl SearchConfig {
    /// Create a fast config for testing: a cycle cap with a generous deadline.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_secs(30),
            max_cycles: Some(500),
            ..Self::default()
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: cap the number of cycles.
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Builder pattern: set the final move rule.
    pub fn with_final_choice(mut self, choice: FinalChoice) -> Self {
        self.final_choice = choice;
        self
    }

    /// Budget described by this config, with the deadline starting now.
    pub fn budget(&self) -> FirstOf<Deadline, CycleLimit> {
        let cycles = self
            .max_cycles
            .map(CycleLimit::new)
            .unwrap_or_else(CycleLimit::unlimited);
        FirstOf(Deadline::new(self.time_budget), cycles)
    }
}
