//! Audit trace models.
//!
//! Every calculation records the rule applications that produced it, so a
//! breakdown can be explained line by line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_calculator::models::AuditTrace;
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let trace = AuditTrace {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     steps: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.step("bracket_tax").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrace {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Finds the first step recorded for `rule_id`.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Sample".to_string(),
            input: serde_json::json!({ "amount": "1" }),
            output: serde_json::json!({ "amount": "2" }),
            reasoning: "1 -> 2".to_string(),
        }
    }

    #[test]
    fn test_step_lookup_by_rule_id() {
        let trace = AuditTrace {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            steps: vec![sample_step(1, "monthly_gross"), sample_step(2, "bracket_tax")],
            duration_us: 5,
        };

        assert_eq!(trace.step("bracket_tax").unwrap().step_number, 2);
        assert!(trace.step("unknown").is_none());
    }

    #[test]
    fn test_audit_step_serializes_camel_case() {
        let json = serde_json::to_value(sample_step(3, "local_income_tax")).unwrap();

        assert_eq!(json["stepNumber"], 3);
        assert_eq!(json["ruleId"], "local_income_tax");
        assert_eq!(json["input"]["amount"], "1");
    }

    #[test]
    fn test_audit_trace_round_trips() {
        let trace = AuditTrace {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            steps: vec![sample_step(1, "monthly_gross")],
            duration_us: 42,
        };

        let json = serde_json::to_string(&trace).unwrap();
        let parsed: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
