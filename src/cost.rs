/*!
 * Cost accounting for external API usage.
 *
 * Every backend call produces one `CostRecord`. Records are carried in an
 * explicit `CostAccumulator` value that the engine threads through its calls
 * and the orchestrator sums per artifact and per batch, so there is no
 * hidden shared state between concurrently running batches.
 */

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of billable external operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A text-generation call made to translate a field or chunk
    Translation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Translation => write!(f, "translation"),
        }
    }
}

/// One append-only entry in the cost ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    /// Kind of operation that incurred the cost
    pub operation: OperationKind,
    /// Cost in USD
    pub amount: f64,
    /// Free-form metadata (model, language pair, token counts)
    pub metadata: Value,
}

/// Token counts reported by the backend for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u64,
    /// Tokens produced in the completion
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Total token count for the call
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Per-model pricing, expressed in USD per million tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Price per million prompt tokens
    pub input_per_mtok: f64,
    /// Price per million completion tokens
    pub output_per_mtok: f64,
}

impl ModelPricing {
    /// Monetary cost of one call given its token usage
    pub fn cost_for(&self, usage: &TokenUsage) -> f64 {
        let input = usage.prompt_tokens as f64 * self.input_per_mtok / 1_000_000.0;
        let output = usage.completion_tokens as f64 * self.output_per_mtok / 1_000_000.0;
        input + output
    }
}

impl Default for ModelPricing {
    fn default() -> Self {
        Self {
            input_per_mtok: 3.0,
            output_per_mtok: 15.0,
        }
    }
}

/// Explicit accumulator for the cost of a sequence of calls.
///
/// Created per artifact, passed by mutable reference through the engine,
/// and merged upward by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct CostAccumulator {
    records: Vec<CostRecord>,
    total: f64,
}

impl CostAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record
    pub fn add(&mut self, record: CostRecord) {
        self.total += record.amount;
        self.records.push(record);
    }

    /// Absorb another accumulator's records
    pub fn merge(&mut self, other: CostAccumulator) {
        self.total += other.total;
        self.records.extend(other.records);
    }

    /// Total accumulated cost in USD
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of records accumulated
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no cost has been accumulated
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The accumulated records, oldest first
    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }
}
