//! Plan domain types: the structured shapes exchanged with the model.
//!
//! Both shapes are deliberately lenient on input: a missing key (or an
//! explicit `null`) becomes an empty value instead of a parse failure.

use serde::{Deserialize, Deserializer, Serialize};

/// Keywords and possibly-relevant files proposed for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    /// Single-token search terms, in the order the model produced them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    /// Project-relative paths the model believes are missing from the selection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_files: Vec<String>,
}

/// One step of an implementation plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// 1-based. Zero when the model left it out or sent something unusable.
    #[serde(default, deserialize_with = "lenient_step_number")]
    pub step_number: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

/// A complete implementation plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Steps in the order received.
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<PlanStep>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub final_checklist: Vec<String>,

    /// Narrative of what could not be grounded; empty when nothing is missing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_information: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_files: Vec<String>,

    /// Set by the orchestrator when the project listing was empty.
    /// Never taken from the model.
    #[serde(default, skip_deserializing)]
    pub show_missing_information: bool,
}

impl PlanResult {
    /// Whether the model reported anything under `missing_information`.
    pub fn has_missing_information(&self) -> bool {
        !self.missing_information.trim().is_empty()
    }

    /// Give unnumbered steps their 1-based position.
    pub fn number_steps(&mut self) {
        for (position, step) in self.steps.iter_mut().enumerate() {
            if step.step_number == 0 {
                step.step_number = u32::try_from(position + 1).unwrap_or(u32::MAX);
            }
        }
    }
}

/// Any JSON number (or numeric string) as a step number; anything else is 0.
fn lenient_step_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let number = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => u32::try_from(n).unwrap_or(0),
        Some(Raw::Float(f)) if (1.0..=f64::from(u32::MAX)).contains(&f) => f.round() as u32,
        Some(Raw::Text(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(number)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
