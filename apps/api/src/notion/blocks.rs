//! Block builder — renders a generated strategy document into Notion block
//! trees, one section group per document section.
//!
//! Operates on untyped JSON on purpose: the document shape is assumed, not
//! enforced, and every accessor degrades to a placeholder instead of
//! failing. The model sometimes returns an object where a string was asked
//! for (and vice versa), so the leaf readers accept both.

use serde_json::{json, Value};

/// Notion rejects rich text beyond this length.
const MAX_RICH_TEXT_CHARS: usize = 2000;
const PENDING: &str = "[Pending]";
const DEFAULT_PAGE_TITLE: &str = "UX Strategy Brief";

// ────────────────────────────────────────────────────────────────────────────
// Block constructors
// ────────────────────────────────────────────────────────────────────────────

fn rich_text(content: &str) -> Value {
    let content: String = content.chars().take(MAX_RICH_TEXT_CHARS).collect();
    json!([{ "type": "text", "text": { "content": content } }])
}

fn heading_2(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "heading_2",
        "heading_2": { "rich_text": rich_text(content) }
    })
}

fn heading_3(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "heading_3",
        "heading_3": { "rich_text": rich_text(content) }
    })
}

fn paragraph(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": rich_text(content) }
    })
}

fn bullet_item(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": rich_text(content) }
    })
}

fn callout(content: &str, icon: &str) -> Value {
    json!({
        "object": "block",
        "type": "callout",
        "callout": {
            "rich_text": rich_text(content),
            "icon": { "emoji": icon },
            "color": "gray_background"
        }
    })
}

fn divider() -> Value {
    json!({ "object": "block", "type": "divider", "divider": {} })
}

// ────────────────────────────────────────────────────────────────────────────
// Leaf readers — tolerant of the model deviating from the document shape
// ────────────────────────────────────────────────────────────────────────────

/// Renders a leaf value as display text. Non-string leaves are
/// JSON-serialized rather than dropped.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| s.clone())
        }
        other => Some(other.to_string()),
    }
}

/// String field of `section`, or the placeholder.
fn str_field(section: &Value, key: &str) -> String {
    section
        .get(key)
        .and_then(display_text)
        .unwrap_or_else(|| PENDING.to_string())
}

/// String field with a custom fallback (used by the persona header, which
/// degrades to empty segments instead of placeholders).
fn str_field_or(section: &Value, key: &str, default: &str) -> String {
    section
        .get(key)
        .and_then(display_text)
        .unwrap_or_else(|| default.to_string())
}

/// A present, non-null subvalue.
fn present<'a>(section: &'a Value, key: &str) -> Option<&'a Value> {
    section.get(key).filter(|v| !v.is_null())
}

/// One bullet per array item; a lone placeholder bullet when the value is
/// missing, not an array, or empty.
fn list_from_array(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| bullet_item(&display_text(item).unwrap_or_else(|| PENDING.to_string())))
            .collect(),
        _ => vec![bullet_item(PENDING)],
    }
}

/// Joins an array with `" | "`; passes strings through; serializes the rest.
fn join_items(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| display_text(item).unwrap_or_else(|| PENDING.to_string()))
            .collect::<Vec<_>>()
            .join(" | "),
        other => display_text(other).unwrap_or_else(|| PENDING.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the full document into an ordered block list. Sections absent
/// from the input produce no blocks at all.
pub fn build_document_blocks(data: &Value) -> Vec<Value> {
    let mut blocks = Vec::new();

    let title = data
        .get("projectName")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_PAGE_TITLE);
    blocks.push(heading_2(&format!("📋 {title}")));
    blocks.push(divider());

    if let Some(overview) = present(data, "project_overview") {
        blocks.extend(overview_blocks(overview));
    }
    if let Some(outline) = present(data, "outline_scope") {
        blocks.extend(outline_blocks(outline));
    }
    if let Some(research) = present(data, "user_research") {
        blocks.extend(research_blocks(research));
    }
    if let Some(persona) = present(data, "user_persona") {
        blocks.extend(persona_blocks(persona));
    }
    if let Some(empathy) = present(data, "empathy_map") {
        blocks.extend(empathy_blocks(empathy));
    }
    if let Some(Value::Array(stages)) = present(data, "journey_map") {
        blocks.extend(journey_blocks(stages));
    }
    if let Some(synthesis) = present(data, "research_synthesis") {
        blocks.extend(synthesis_blocks(synthesis));
    }

    blocks
}

fn overview_blocks(overview: &Value) -> Vec<Value> {
    let mut blocks = vec![
        heading_2("1. Project Overview"),
        heading_3("📋 Description"),
        paragraph(&str_field(overview, "description")),
        heading_3("→ Target Audience"),
    ];

    if let Some(audience) = present(overview, "target_audience") {
        if audience.is_object() {
            blocks.push(callout(&str_field(audience, "primary"), "👥"));
            if let Some(secondary) = present(audience, "secondary").and_then(display_text) {
                blocks.push(paragraph(&format!("Secondary: {secondary}")));
            }
        } else {
            blocks.push(callout(&join_items(audience), "👥"));
        }
    }

    blocks.push(heading_3("🎯 Objectives"));
    blocks.extend(list_from_array(overview.get("objectives")));
    blocks.push(heading_3("! Motivation"));
    blocks.push(callout(&str_field(overview, "motivation"), "💡"));
    blocks.push(divider());
    blocks
}

fn outline_blocks(outline: &Value) -> Vec<Value> {
    let mut blocks = vec![
        heading_2("2. Outline & Scope"),
        heading_3("⚠️ Problem Statement"),
        callout(&str_field(outline, "problem_statement"), "⚠️"),
        heading_3("📝 Assumptions"),
    ];
    blocks.extend(list_from_array(outline.get("assumptions")));
    blocks.push(heading_3("🔒 Constraints"));
    blocks.extend(list_from_array(outline.get("constraints")));

    if let Some(features) = present(outline, "features") {
        blocks.push(heading_3("✨ Features"));
        blocks.push(paragraph("Must Have:"));
        blocks.extend(list_from_array(features.get("must_have")));
        blocks.push(paragraph("Nice to Have:"));
        blocks.extend(list_from_array(features.get("nice_to_have")));
        blocks.push(paragraph("Out of Scope:"));
        blocks.extend(list_from_array(features.get("out_of_scope")));
    }

    if let Some(metrics) = present(outline, "success_metrics") {
        blocks.push(heading_3("📊 Success Metrics"));
        blocks.push(paragraph("Behavioral:"));
        blocks.extend(list_from_array(metrics.get("behavioral")));
        blocks.push(paragraph("Engagement:"));
        blocks.extend(list_from_array(metrics.get("engagement")));
    }

    blocks.push(divider());
    blocks
}

fn research_blocks(research: &Value) -> Vec<Value> {
    let mut blocks = vec![heading_2("3. User Research"), heading_3("❓ Research Questions")];
    blocks.extend(list_from_array(research.get("research_questions")));
    blocks.push(heading_3("🔬 Methods"));
    blocks.extend(list_from_array(research.get("research_methods")));
    blocks.push(heading_3("🔍 Key Findings"));
    blocks.extend(list_from_array(research.get("key_findings")));

    blocks.push(heading_3("💭 User Needs"));
    match present(research, "user_needs") {
        Some(needs) if needs.is_object() => {
            blocks.push(bullet_item(&format!(
                "Functional: {}",
                str_field(needs, "functional")
            )));
            blocks.push(bullet_item(&format!(
                "Emotional: {}",
                str_field(needs, "emotional")
            )));
            blocks.push(bullet_item(&format!("Social: {}", str_field(needs, "social"))));
        }
        other => blocks.extend(list_from_array(other)),
    }

    blocks.push(heading_3("😤 Frustrations"));
    blocks.extend(list_from_array(research.get("frustrations_detected")));
    blocks.push(heading_3("💬 User Quotes"));
    blocks.extend(list_from_array(research.get("user_quotes")));
    blocks.push(divider());
    blocks
}

fn persona_blocks(persona: &Value) -> Vec<Value> {
    let header = format!(
        "{} — {} — {}",
        str_field_or(persona, "name", "User"),
        str_field_or(persona, "age_occupation", ""),
        str_field_or(persona, "location", "")
    );

    let mut blocks = vec![
        heading_2("4. User Persona"),
        callout(&header, "👤"),
        heading_3("📖 Bio"),
        paragraph(&str_field(persona, "bio")),
        heading_3("💻 Technology"),
    ];

    match present(persona, "technology") {
        Some(technology) if technology.is_object() => {
            blocks.push(bullet_item(&format!(
                "Primary device: {}",
                str_field(technology, "primary_device")
            )));
            blocks.push(bullet_item(&format!(
                "Key apps: {}",
                str_field(technology, "key_apps")
            )));
            blocks.push(bullet_item(&format!(
                "Tech comfort: {}",
                str_field(technology, "tech_comfort")
            )));
        }
        other => blocks.extend(list_from_array(other)),
    }

    blocks.push(heading_3("📅 Daily Routine"));
    if let Some(routine) = present(persona, "routine").filter(|r| r.is_object()) {
        blocks.push(bullet_item(&format!(
            "Morning: {}",
            str_field(routine, "morning")
        )));
        blocks.push(bullet_item(&format!(
            "Workday: {}",
            str_field(routine, "workday")
        )));
        blocks.push(bullet_item(&format!(
            "Evening: {}",
            str_field(routine, "evening")
        )));
    }

    blocks.push(heading_3("🎯 Objectives"));
    blocks.extend(list_from_array(persona.get("user_objectives")));
    blocks.push(heading_3("🔥 Motivations"));
    blocks.extend(list_from_array(persona.get("main_motivations")));
    blocks.push(heading_3("😤 Frustrations"));
    blocks.extend(list_from_array(persona.get("frustrations")));
    blocks.push(divider());
    blocks
}

fn empathy_blocks(empathy: &Value) -> Vec<Value> {
    let mut blocks = vec![heading_2("5. Empathy Map"), heading_3("🧠 THINKS")];
    blocks.extend(list_from_array(empathy.get("thinks")));
    blocks.push(heading_3("❤️ FEELS"));
    blocks.extend(list_from_array(empathy.get("feels")));
    blocks.push(heading_3("💬 SAYS"));
    blocks.extend(list_from_array(empathy.get("says")));
    blocks.push(heading_3("🖐️ DOES"));
    blocks.extend(list_from_array(empathy.get("does")));
    blocks.push(heading_3("😤 PAINS"));
    blocks.push(callout(&str_field(empathy, "pains"), "😤"));
    blocks.push(heading_3("🎉 GAINS"));
    blocks.push(callout(&str_field(empathy, "gains"), "🎉"));
    blocks.push(divider());
    blocks
}

fn journey_blocks(stages: &[Value]) -> Vec<Value> {
    let mut blocks = vec![heading_2("6. Journey Map")];

    for (index, stage) in stages.iter().enumerate() {
        blocks.push(heading_3(&format!(
            "STAGE {}: {} — {}",
            index + 1,
            str_field_or(stage, "stage", "Stage"),
            str_field_or(stage, "timeline", "")
        )));
        blocks.push(paragraph("ACTIONS:"));
        blocks.extend(list_from_array(stage.get("actions")));

        if let Some(feelings) = present(stage, "feelings") {
            let (start, end) = if feelings.is_object() {
                (str_field(feelings, "start"), str_field(feelings, "end"))
            } else {
                (join_items(feelings), String::new())
            };
            blocks.push(callout(&format!("FEELINGS: {start} → {end}"), "💭"));
        }

        if present(stage, "thoughts").is_some() {
            blocks.push(paragraph("THOUGHTS:"));
            blocks.extend(list_from_array(stage.get("thoughts")));
        }

        if let Some(pain_points) = present(stage, "pain_points") {
            blocks.push(callout(&format!("PAINS: {}", join_items(pain_points)), "😤"));
        }

        if let Some(opportunities) = present(stage, "opportunities") {
            blocks.push(callout(
                &format!("OPPORTUNITIES: {}", join_items(opportunities)),
                "💡",
            ));
        }
    }

    blocks.push(divider());
    blocks
}

fn synthesis_blocks(synthesis: &Value) -> Vec<Value> {
    let mut blocks = vec![heading_2("7. Research Synthesis")];

    if let Some(Value::Array(insights)) = present(synthesis, "key_insights") {
        blocks.push(heading_3("🔍 Key Insights"));
        for insight in insights {
            blocks.push(callout(&str_field(insight, "title"), "💡"));
            blocks.push(paragraph(&format!(
                "Evidence: {}",
                str_field(insight, "evidence")
            )));
            blocks.push(paragraph(&format!(
                "Implication: {}",
                str_field(insight, "implication")
            )));
        }
    }

    if let Some(hmw) = present(synthesis, "how_might_we") {
        blocks.push(heading_3("❓ How Might We"));
        if present(hmw, "primary").is_some() {
            blocks.push(paragraph("Primary:"));
            blocks.extend(list_from_array(hmw.get("primary")));
        }
        if present(hmw, "secondary").is_some() {
            blocks.push(paragraph("Secondary:"));
            blocks.extend(list_from_array(hmw.get("secondary")));
        }
    }

    if let Some(Value::Array(principles)) = present(synthesis, "design_principles") {
        blocks.push(heading_3("📐 Design Principles"));
        for principle in principles {
            blocks.push(callout(&format!("# {}", str_field_or(principle, "name", "")), "📐"));
            blocks.push(paragraph(&format!(
                "Definition: {}",
                str_field(principle, "definition")
            )));
            blocks.push(paragraph(&format!(
                "Rationale: {}",
                str_field(principle, "rationale")
            )));
            blocks.push(paragraph(&format!(
                "Application: {}",
                str_field(principle, "application")
            )));
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block_text(block: &Value) -> &str {
        let block_type = block["type"].as_str().unwrap();
        block[block_type]["rich_text"][0]["text"]["content"]
            .as_str()
            .unwrap()
    }

    fn texts_of_type<'a>(blocks: &'a [Value], block_type: &str) -> Vec<&'a str> {
        blocks
            .iter()
            .filter(|b| b["type"] == block_type)
            .map(block_text)
            .collect()
    }

    #[test]
    fn test_title_header_uses_project_name() {
        let blocks = build_document_blocks(&json!({ "projectName": "Atlas" }));
        assert_eq!(block_text(&blocks[0]), "📋 Atlas");
        assert_eq!(blocks[1]["type"], "divider");
    }

    #[test]
    fn test_title_header_falls_back_without_project_name() {
        let blocks = build_document_blocks(&json!({}));
        assert_eq!(block_text(&blocks[0]), "📋 UX Strategy Brief");
    }

    #[test]
    fn test_absent_sections_produce_no_blocks() {
        let blocks = build_document_blocks(&json!({ "projectName": "Atlas" }));
        // Only the title header and its divider.
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_every_present_section_gets_its_heading() {
        let data = json!({
            "projectName": "Atlas",
            "project_overview": { "description": "d" },
            "outline_scope": { "problem_statement": "p" },
            "user_research": { "user_needs": { "functional": "f" } },
            "user_persona": { "name": "Maya" },
            "empathy_map": { "pains": "p", "gains": "g" },
            "journey_map": [{ "stage": "Discovery", "timeline": "Day 0" }],
            "research_synthesis": { "how_might_we": { "primary": ["q"] } }
        });
        let blocks = build_document_blocks(&data);
        let headings = texts_of_type(&blocks, "heading_2");
        assert_eq!(
            headings,
            vec![
                "📋 Atlas",
                "1. Project Overview",
                "2. Outline & Scope",
                "3. User Research",
                "4. User Persona",
                "5. Empathy Map",
                "6. Journey Map",
                "7. Research Synthesis",
            ]
        );
    }

    #[test]
    fn test_missing_leaves_render_pending_placeholder() {
        let blocks = build_document_blocks(&json!({ "project_overview": {} }));
        let paragraphs = texts_of_type(&blocks, "paragraph");
        assert!(paragraphs.contains(&PENDING));
        let bullets = texts_of_type(&blocks, "bulleted_list_item");
        assert!(bullets.contains(&PENDING));
    }

    #[test]
    fn test_rich_text_truncates_to_service_limit() {
        let long = "x".repeat(3000);
        let blocks = build_document_blocks(&json!({
            "project_overview": { "description": long }
        }));
        let description = texts_of_type(&blocks, "paragraph")
            .into_iter()
            .find(|t| t.starts_with('x'))
            .unwrap();
        assert_eq!(description.chars().count(), MAX_RICH_TEXT_CHARS);
    }

    #[test]
    fn test_non_string_list_items_are_serialized() {
        let blocks = build_document_blocks(&json!({
            "project_overview": { "objectives": [{ "goal": "ship" }, "plain"] }
        }));
        let bullets = texts_of_type(&blocks, "bulleted_list_item");
        assert!(bullets.contains(&r#"{"goal":"ship"}"#));
        assert!(bullets.contains(&"plain"));
    }

    #[test]
    fn test_string_target_audience_renders_as_callout() {
        let blocks = build_document_blocks(&json!({
            "project_overview": { "target_audience": "Designers everywhere" }
        }));
        let callouts = texts_of_type(&blocks, "callout");
        assert!(callouts.contains(&"Designers everywhere"));
    }

    #[test]
    fn test_user_needs_object_renders_labeled_bullets() {
        let blocks = build_document_blocks(&json!({
            "user_research": {
                "user_needs": { "functional": "structure ideas", "emotional": "confidence" }
            }
        }));
        let bullets = texts_of_type(&blocks, "bulleted_list_item");
        assert!(bullets.contains(&"Functional: structure ideas"));
        assert!(bullets.contains(&"Emotional: confidence"));
        assert!(bullets.contains(&"Social: [Pending]"));
    }

    #[test]
    fn test_journey_stage_renders_header_feelings_and_pains() {
        let blocks = build_document_blocks(&json!({
            "journey_map": [{
                "stage": "Discovery",
                "timeline": "Day 0",
                "actions": ["searches for tools"],
                "feelings": { "start": "Curious", "end": "Hopeful" },
                "pain_points": ["[Pain]: no structure", "[Pain]: lost drafts"]
            }]
        }));
        let headings = texts_of_type(&blocks, "heading_3");
        assert!(headings.contains(&"STAGE 1: Discovery — Day 0"));
        let callouts = texts_of_type(&blocks, "callout");
        assert!(callouts.contains(&"FEELINGS: Curious → Hopeful"));
        assert!(callouts.contains(&"PAINS: [Pain]: no structure | [Pain]: lost drafts"));
    }

    #[test]
    fn test_journey_string_feelings_still_render() {
        let blocks = build_document_blocks(&json!({
            "journey_map": [{ "feelings": "Anxious" }]
        }));
        let callouts = texts_of_type(&blocks, "callout");
        assert!(callouts.contains(&"FEELINGS: Anxious → "));
    }

    #[test]
    fn test_synthesis_insights_and_principles_render() {
        let blocks = build_document_blocks(&json!({
            "research_synthesis": {
                "key_insights": [{ "title": "Users stall at blank pages", "evidence": "n=10" }],
                "design_principles": [{ "name": "Guide, Don't Dictate" }]
            }
        }));
        let callouts = texts_of_type(&blocks, "callout");
        assert!(callouts.contains(&"Users stall at blank pages"));
        assert!(callouts.contains(&"# Guide, Don't Dictate"));
        let paragraphs = texts_of_type(&blocks, "paragraph");
        assert!(paragraphs.contains(&"Evidence: n=10"));
        assert!(paragraphs.contains(&"Definition: [Pending]"));
    }

    #[test]
    fn test_blocks_carry_notion_envelope_fields() {
        let blocks = build_document_blocks(&json!({ "empathy_map": { "pains": "p" } }));
        for block in &blocks {
            assert_eq!(block["object"], "block");
            assert!(block["type"].is_string());
        }
        let pains = blocks
            .iter()
            .find(|b| b["type"] == "callout" && block_text(b) == "p")
            .unwrap();
        assert_eq!(pains["callout"]["icon"]["emoji"], "😤");
        assert_eq!(pains["callout"]["color"], "gray_background");
    }
}
