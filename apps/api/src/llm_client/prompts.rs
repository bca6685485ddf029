// Cross-cutting prompt fragments shared by JSON-emitting model calls.
// Module-specific prompts live in a prompts.rs beside the module that sends them.

/// Output-format rules fragment, composed into every system prompt that
/// expects a JSON document back.
pub const OUTPUT_RULES: &str = "=== CRITICAL: OUTPUT RULES ===\n\
1. Return ONLY valid JSON. No markdown, no code blocks, no text before or after.\n\
2. Ensure all strings are properly escaped (use \\\" for quotes inside strings).\n\
3. Ensure all arrays and objects are properly closed.\n\
4. Do NOT include trailing commas.\n\
5. Keep string values under 500 characters each.";
