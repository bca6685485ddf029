//! Repair — heuristic fixes for common small-scale malformations in
//! near-valid JSON from the model. Pattern-based, not grammar-aware: the
//! output must still go through a parser before anyone trusts it.
//!
//! The transforms run in a fixed order and later steps assume earlier ones
//! already ran (delimiter balancing expects trailing prose to be gone).

use std::sync::OnceLock;

use regex::Regex;

/// Applies all repair heuristics in order. Best effort only.
pub fn repair(text: &str) -> String {
    let repaired = strip_trailing_commas(text);
    let repaired = insert_missing_commas(&repaired);
    let repaired = truncate_after_final_brace(&repaired);
    let repaired = balance_braces(&repaired);
    balance_brackets(&repaired)
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("valid regex"))
}

/// Removes trailing commas immediately before a closing brace or bracket.
pub fn strip_trailing_commas(text: &str) -> String {
    trailing_comma_re().replace_all(text, "${1}").into_owned()
}

fn adjacent_strings_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(\")\\s*\n\\s*(\")").expect("valid regex"))
}

/// Inserts a comma between two quoted strings separated only by a line
/// break; the model sometimes drops the separator between fields.
///
/// Deliberately narrow: this targets one observed failure shape, and a more
/// general version starts rewriting valid strings that happen to contain
/// adjacent quotes.
pub fn insert_missing_commas(text: &str) -> String {
    adjacent_strings_re()
        .replace_all(text, "${1},\n  ${2}")
        .into_owned()
}

/// Drops any trailing content after the final closing brace.
pub fn truncate_after_final_brace(text: &str) -> String {
    match text.rfind('}') {
        Some(pos) => text[..=pos].to_string(),
        None => text.to_string(),
    }
}

/// Appends the deficit of closing braces. Counts are naive; quoted braces
/// skew them, accepted for this pass.
pub fn balance_braces(text: &str) -> String {
    let open = text.matches('{').count();
    let close = text.matches('}').count();
    if open > close {
        format!("{text}{}", "}".repeat(open - close))
    } else {
        text.to_string()
    }
}

/// Appends the deficit of closing brackets, inserted immediately before the
/// final closing brace so array closures land inside the outermost object.
/// Runs after `balance_braces`, which guarantees that final brace exists
/// whenever the text holds an object at all.
pub fn balance_brackets(text: &str) -> String {
    let open = text.matches('[').count();
    let close = text.matches(']').count();
    if open <= close {
        return text.to_string();
    }
    let missing = "]".repeat(open - close);
    match text.rfind('}') {
        Some(pos) => format!("{}{}{}", &text[..pos], missing, &text[pos..]),
        None => format!("{text}{missing}"),
    }
}
