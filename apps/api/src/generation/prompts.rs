// All prompt constants for the Generation module.
// Reuses the cross-cutting output-rules fragment from llm_client::prompts.

use crate::llm_client::prompts::OUTPUT_RULES;

/// System prompt template. `{output_rules}` is filled from llm_client::prompts.
const GENERATION_SYSTEM_TEMPLATE: &str = r#"You are a Senior UX Researcher and Strategist creating professional UX discovery documentation.

{output_rules}

=== COPY RULES ===
1. USE ACTIVE VERBS: helps, enables, supports, reduces, clarifies, surfaces, streamlines, guides, blocks, triggers
   NEVER use: "is designed to", "aims to", "is intended for", "innovative", "seamless", "powerful", "cutting-edge", "robust", "comprehensive", "holistic", "leverage", "utilize", "empower"

2. LABEL EVERYTHING with prefixes:
   - [Fact]: Confirmed through research
   - [Assumption]: Needs validation through testing
   - [Needs validation]: Requires user analytics
   - [Frustration]: Pain point with impact
   - [Internal driver]: Personal motivation
   - [External pressure]: Outside force
   - [Main frustration]: Primary pain
   - [Secondary frustration]: Lesser pain
   - [Pain]: Journey obstacle

3. ADD CONTEXT after statements using " — " (em dash):
   - "70% struggle with structuring — directly observed in research"
   - "Reduce time by 50% — enables faster transition"
   - "Primary device: Laptop — uses for design and ideation"

4. USE SPECIFIC FORMATS:
   - Metrics: "Baseline X% → Target Y% — indicates improvement"
   - Constraints: "Technical: Description — affects feature"
   - Timeline: "Day 0", "Day 1-3", "Day 7+"
   - Feelings transitions: "Excited — triggered by X → Hopeful — after Y"

5. SHORT SENTENCES: Max 25 words. Write for iteration and editing.

6. STRUCTURE PAINS/GAINS:
   - Pains: "Fear of X blocks progress. Consequences of not solving include Y. Biggest obstacle remains Z."
   - Gains: "Success means X. Ideal state includes Y. They would feel Z if solved.""#;

/// Returns the full system prompt for document generation.
pub fn generation_system() -> String {
    GENERATION_SYSTEM_TEMPLATE.replace("{output_rules}", OUTPUT_RULES)
}

/// User prompt template. Replace `{document_shape}` before `{fields}` so
/// user-supplied field text can never inject into the shape slot.
pub const PROMPT_TEMPLATE: &str = r#"Generate a comprehensive UX strategy document as JSON based on this input:

{fields}

Return this EXACT JSON structure. Follow the format examples carefully:

{document_shape}"#;

/// The target document shape, embedded verbatim in every generation prompt.
/// The pipeline never validates against it; the shape is a contract with the
/// model and the downstream renderer, not with this service.
pub const DOCUMENT_SHAPE: &str = r#"{
  "projectName": "string",
  "project_overview": {
    "description": "string - 2 sentences: what it does + who it helps + key benefit. Example: 'ProductName helps [Users] quickly transform [problem] into [solution] by [method]. It reduces [friction] and supports [outcome].'",
    "target_audience": {
      "primary": "string - main users with context. Example: 'Product Designers and Builders — who need to transform vague ideas into structured artifacts'",
      "secondary": "string - secondary users. Example: 'Solo designers needing structure'"
    },
    "objectives": [
      "string - format: 'Action + metric — benefit'. Example: 'Reduce discovery time by 50% — enables faster transition to design'",
      "string - 3 total objectives with specific metrics and benefits"
    ],
    "motivation": "string - why project exists + consequence of not solving + what addressing it enables. Example: 'This project exists because [problem context]. Current solutions fail to [gap]. Addressing this helps users [benefit] and supports [outcome].'"
  },
  "outline_scope": {
    "problem_statement": "string - format: '[User] needs to [action] because [reason]. Currently, [barrier] blocks them, resulting in [consequence].'",
    "assumptions": [
      "string - format: '[Assumption] Statement — needs validation through [method]'. Example: '[Assumption] Users prefer structured guidance over free-form text — needs validation through user testing'"
    ],
    "constraints": [
      "string - format: 'Category: Description — impact'. Categories: Technical, Timeline, Budget, Platform. Example: 'Technical: Dependent on third-party AI APIs — affects artifact generation'"
    ],
    "features": {
      "must_have": [
        "string - format: 'Feature name — benefit, consequence without it'. Example: 'Guided input form with UX-focused questions — enables structured discovery, blocks launch without it'"
      ],
      "nice_to_have": [
        "string - format: 'Feature name — benefit, priority note'. Example: 'Figma export — improves design integration, consider for v1.1'"
      ],
      "out_of_scope": [
        "string - format: 'Feature name — reason excluded, future note'. Example: 'Full UI design system generation — deferred to future phase, revisit after MVP success'"
      ]
    },
    "success_metrics": {
      "behavioral": [
        "string - format: 'Metric name: Baseline X% → Target Y% — indicates [what it measures]'. Example: 'Task completion: Baseline 60% → Target 85% — indicates reduced friction'"
      ],
      "engagement": [
        "string - format: 'Metric name: Target X% — surfaces [what it measures]'. Example: 'Weekly active users: Target 40% — surfaces adoption patterns'"
      ]
    }
  },
  "user_research": {
    "research_questions": [
      "string - format: 'Question? — surfaces [what it reveals]'. Example: 'What blocks users when structuring early ideas? — surfaces friction points'"
    ],
    "research_methods": [
      "string - format: 'Method (sample size) — key finding'. Example: 'User interviews (n=10) — surfaced need for structured guidance'"
    ],
    "key_findings": [
      "string - format: '[Label] Finding — context'. Labels: [Fact], [Assumption], [Needs validation]. Example: '[Fact] 70% of users struggle with idea structuring — directly observed in research'"
    ],
    "user_needs": {
      "functional": "string - what users need to do. Example: 'Users need to structure ideas without losing time'",
      "emotional": "string - how users want to feel. Example: 'Users want to feel confident about early decisions'",
      "social": "string - social/team needs. Example: 'Users need to share structured outputs with teams'"
    },
    "frustrations_detected": [
      "string - format: '[Frustration]: Description — impact'. Example: '[Frustration]: Current tools require manual structuring — slows users down'"
    ],
    "user_quotes": [
      "string - format: 'Quote — reveals [insight]'. Example: 'I hate starting from scratch — reveals emotional weight'"
    ]
  },
  "user_persona": {
    "name": "string - realistic first name",
    "age_occupation": "string - format: 'Age / Occupation'. Example: '30 / Product Designer'",
    "location": "string - city, country. Example: 'New York, USA'",
    "bio": "string - 2 sentences: what they do + what they value + what they struggle with",
    "technology": {
      "primary_device": "string - format: 'Device — usage context'. Example: 'Laptop — uses for design and ideation'",
      "key_apps": "string - format: 'App1, App2 — indicates preference'. Example: 'Figma, Notion — indicates preference for design and organization'",
      "tech_comfort": "string - format: 'Level — affects what'. Example: 'High — affects onboarding needs'"
    },
    "routine": {
      "morning": "string - format: 'Activity — opportunity note'. Example: 'Reviews ideas related to ongoing projects — opportunity for intervention'",
      "workday": "string - format: 'Activity — friction note'. Example: 'Encounters friction when structuring ideas — peak frustration moment'",
      "evening": "string - format: 'Activity — use case note'. Example: 'Reflects on day work and plans next steps — possible use case'"
    },
    "user_objectives": [
      "string - format: 'Priority: Goal — success measure'. Example: 'Primary: Structure product ideas quickly — measures success by reduced time spent'"
    ],
    "main_motivations": [
      "string - format: '[Label]: Motivation — impact'. Labels: [Internal driver], [External pressure]. Example: '[Internal driver]: Wants to feel confident — shapes messaging'"
    ],
    "frustrations": [
      "string - format: '[Label]: Frustration'. Labels: [Main frustration], [Secondary frustration]. Example: '[Main frustration]: Starting with a blank page causes anxiety'"
    ]
  },
  "empathy_map": {
    "thinks": [
      "string - internal thoughts. Example: 'Worries about missing key aspects of the idea'"
    ],
    "feels": [
      "string - emotions. Example: 'Frustrated when starting from scratch'"
    ],
    "says": [
      "string - format: 'Context: Quote'. Example: 'Tells colleagues: I need a better way to structure ideas'"
    ],
    "does": [
      "string - observable actions. Example: 'Relies on templates when facing a blank page'"
    ],
    "pains": "string - format: 'Fear of X blocks progress. Consequences of not solving include Y. The biggest obstacle remains Z.'",
    "gains": "string - format: 'Success means X. Ideal state includes Y. They would feel Z if the solution worked.'"
  },
  "journey_map": [
    {
      "stage": "Discovery",
      "timeline": "Day 0",
      "actions": ["string - user actions in this stage"],
      "feelings": {
        "start": "string - format: 'Emotion — trigger'. Example: 'Excited — triggered by new idea'",
        "end": "string - format: 'Emotion — after what'. Example: 'Hopeful — after finding potential solutions'"
      },
      "thoughts": [
        "string - format: 'Prefix: Thought'. Prefixes: Thinks, Wonders, Asks, Compares, Evaluates. Example: 'Thinks: How do I structure this idea?'"
      ],
      "pain_points": [
        "string - format: '[Pain]: Description'. Example: '[Pain]: Lack of structure blocks progress'"
      ],
      "opportunities": [
        "string - format: 'Action by method'. Example: 'Reduce friction by providing guided input'"
      ]
    },
    {
      "stage": "Onboarding",
      "timeline": "Day 1-3",
      "actions": ["string"],
      "feelings": {
        "start": "string",
        "end": "string"
      },
      "thoughts": ["string"],
      "pain_points": ["string"],
      "opportunities": ["string"]
    },
    {
      "stage": "Regular Use",
      "timeline": "Day 7+",
      "actions": ["string"],
      "feelings": {
        "start": "string",
        "end": "string"
      },
      "thoughts": ["string"],
      "pain_points": ["string"],
      "opportunities": ["string"]
    }
  ],
  "research_synthesis": {
    "key_insights": [
      {
        "title": "string - insight statement",
        "evidence": "string - supporting data with source",
        "implication": "string - format: 'Suggests [action]. Consider [additional].' Example: 'Suggests designing guided input forms. Consider simplifying questions.'"
      }
    ],
    "how_might_we": {
      "primary": [
        "string - format: 'How might we [action] for [users]?'. Example: 'How might we reduce blank-page friction for designers?'"
      ],
      "secondary": [
        "string - edge cases and differentiation. Example: 'How might we support edge case users in unique scenarios?'"
      ]
    },
    "design_principles": [
      {
        "name": "string - short memorable name. Example: 'Guide, Don't Dictate'",
        "definition": "string - what it means. Example: 'Provide structured guidance without overwhelming users'",
        "rationale": "string - why it matters. Example: 'Addresses need for clarity and control'",
        "application": "string - when to apply. Example: 'When designing forms, offer optional prompts'"
      }
    ]
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_system_contains_output_rules() {
        let system = generation_system();
        assert!(system.contains("Return ONLY valid JSON"));
        assert!(system.contains("Senior UX Researcher"));
        assert!(!system.contains("{output_rules}"));
    }

    #[test]
    fn test_document_shape_is_itself_valid_structure_text() {
        // The shape is descriptive text, not strict JSON (it holds prose values),
        // but it must still parse: it is sent as the model's target example.
        let parsed: serde_json::Value = serde_json::from_str(DOCUMENT_SHAPE).unwrap();
        assert!(parsed.get("project_overview").is_some());
        assert_eq!(parsed["journey_map"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_prompt_template_has_both_slots() {
        assert!(PROMPT_TEMPLATE.contains("{fields}"));
        assert!(PROMPT_TEMPLATE.contains("{document_shape}"));
    }
}
