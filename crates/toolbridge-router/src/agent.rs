//! Routing targets and results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Specialist agents a request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    #[serde(rename = "next_steps_planner")]
    NextStepsPlanner,
    #[serde(rename = "coder-agent")]
    Coder,
    #[serde(rename = "helper-agent")]
    Helper,
    #[serde(rename = "test-agent")]
    Test,
    #[serde(rename = "general-purpose-agent")]
    GeneralPurpose,
}

impl AgentType {
    pub const ALL: [Self; 5] = [
        Self::NextStepsPlanner,
        Self::Test,
        Self::Coder,
        Self::Helper,
        Self::GeneralPurpose,
    ];

    /// Wire name, as the model is asked to spell it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextStepsPlanner => "next_steps_planner",
            Self::Coder => "coder-agent",
            Self::Helper => "helper-agent",
            Self::Test => "test-agent",
            Self::GeneralPurpose => "general-purpose-agent",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|agent| agent.as_str() == s)
            .ok_or_else(|| format!("unknown agent: {s}"))
    }
}

/// Routing decision for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub agent: AgentType,
    /// Model-reported certainty in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl RoutingResult {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}

/// Coarse confidence buckets used when summarising batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceBand {
    /// At least 0.9.
    High,
    /// At least 0.7.
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.9 {
            Self::High
        } else if confidence >= 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Confidence distribution over a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Mean confidence; zero for an empty batch.
    pub average: f64,
}

impl BatchSummary {
    #[allow(clippy::cast_precision_loss)] // Batch sizes are small
    pub fn of(results: &[RoutingResult]) -> Self {
        let mut summary = Self::default();
        if results.is_empty() {
            return summary;
        }

        for result in results {
            match result.band() {
                ConfidenceBand::High => summary.high += 1,
                ConfidenceBand::Medium => summary.medium += 1,
                ConfidenceBand::Low => summary.low += 1,
            }
        }
        summary.average =
            results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;
        summary
    }

    pub const fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
