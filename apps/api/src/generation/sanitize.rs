//! Sanitize — strips non-JSON wrapping artifacts from model output before
//! structural repair. Fences first, then prose: the final slice from the
//! first `{` to the last `}` discards anything the model said around the
//! document. Every step is idempotent on already-clean input.

/// Cleans raw model output down to the bare object span.
/// Input with no object span at all yields `"{}"`.
pub fn sanitize(text: &str) -> String {
    slice_to_object(strip_fences(text))
}

/// Strips a leading ```json fence, a leading bare ``` fence, and a trailing
/// ``` fence, each independently, so a truncated response missing its
/// closing fence is still unwrapped.
fn strip_fences(text: &str) -> &str {
    let mut text = text.trim();
    for opening in ["```json", "```"] {
        if let Some(rest) = text.strip_prefix(opening) {
            text = rest.trim_start();
        }
        if let Some(rest) = text.strip_suffix("```") {
            text = rest.trim_end();
        }
    }
    text
}

/// Slices to exactly the span from the first `{` to the last `}`.
fn slice_to_object(text: &str) -> String {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => text[start..=end].to_string(),
        _ => "{}".to_string(),
    }
}
