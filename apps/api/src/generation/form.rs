//! Form record — the flat field map the browser form submits, and the
//! deterministic prompt built from it.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::generation::prompts::{DOCUMENT_SHAPE, PROMPT_TEMPLATE};

/// Placeholder rendered for absent or empty fields.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

const DEFAULT_LIST_SEPARATOR: &str = ", ";
/// Journey stages read as a pipeline, not a list.
const JOURNEY_SEPARATOR: &str = " | ";

/// A single form field value: free text or a list of selections.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Renders the value for prompt interpolation, or `None` when effectively empty.
    fn render(&self, list_separator: &str) -> Option<String> {
        match self {
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<_>>()
                    .join(list_separator);
                (!joined.is_empty()).then_some(joined)
            }
        }
    }
}

/// The inbound generation request: a flat map of form field name to value.
/// No schema is enforced beyond "string or string list" — unknown keys are
/// carried but only the known field table below reaches the prompt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

struct PromptField {
    label: &'static str,
    key: &'static str,
    list_separator: &'static str,
}

const fn field(label: &'static str, key: &'static str) -> PromptField {
    PromptField {
        label,
        key,
        list_separator: DEFAULT_LIST_SEPARATOR,
    }
}

/// Ordered field table; the order is part of the prompt contract.
const PROMPT_FIELDS: &[PromptField] = &[
    field("PROJECT", "projectName"),
    field("DESCRIPTION", "oneSentence"),
    field("TYPE", "productType"),
    field("PLATFORMS", "primaryPlatforms"),
    field("CONTEXT", "realWorldSituation"),
    field("PROBLEMS", "whatGoesWrong"),
    field("WORKAROUNDS", "currentWorkarounds"),
    field("TARGET USER", "userRoleContext"),
    field("USER GOALS", "tryingToAccomplish"),
    field("RESEARCH", "researchBackingDetails"),
    field("DESIRED OUTCOME", "desiredOutcome"),
    field("WHY USE THIS", "whyUseThis"),
    field("PRODUCT GOALS", "productGoals"),
    field("MUST-HAVE", "mustHaveFeatures"),
    field("NICE-TO-HAVE", "niceToHave"),
    field("OUT OF SCOPE", "outOfScope"),
    field("TECH CONSTRAINTS", "technicalPlatformConstraints"),
    field("BUSINESS CONSTRAINTS", "businessTimelineConstraints"),
    field("RISKS", "adoptionRisks"),
    field("METRICS", "keyMetrics"),
    field("FACTS", "facts"),
    field("ASSUMPTIONS", "assumptions"),
    field("NEEDS VALIDATION", "needsValidation"),
    field("PERSONA", "ageOccupation"),
    field("TECH PROFICIENCY", "techProficiency"),
    field("MOTIVATIONS", "mainMotivations"),
    field("ROUTINE", "dailyRoutineSnapshot"),
    PromptField {
        label: "JOURNEY",
        key: "journeyStages",
        list_separator: JOURNEY_SEPARATOR,
    },
    field("OPPORTUNITIES", "opportunityAreas"),
];

/// Renders the request into the full generation prompt.
///
/// Pure and deterministic: the same request always yields the same string.
/// `{document_shape}` is substituted before `{fields}` so field text cannot
/// inject into the shape slot.
pub fn build_prompt(request: &GenerateRequest) -> String {
    let fields = PROMPT_FIELDS
        .iter()
        .map(|field| {
            let value = request
                .fields
                .get(field.key)
                .and_then(|v| v.render(field.list_separator))
                .unwrap_or_else(|| MISSING_FIELD_PLACEHOLDER.to_string());
            format!("{}: {}", field.label, value)
        })
        .collect::<Vec<_>>()
        .join("\n");

    PROMPT_TEMPLATE
        .replace("{document_shape}", DOCUMENT_SHAPE)
        .replace("{fields}", &fields)
}
