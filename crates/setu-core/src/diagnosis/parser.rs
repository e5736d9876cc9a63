//! Parsing of the AI job's free-text output.
//!
//! The completed job carries a `prompt` field that is *expected* to contain
//! a JSON array of suggestions, but models routinely wrap it in a markdown
//! code fence or return a single object. Parsing never fails outright:
//! anything unrecognizable degrades to one synthetic suggestion carrying
//! the raw text.

use super::model::DiagnosisSuggestion;

/// Removes markdown code-fence markers around the payload.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses AI output into suggestions, degrading gracefully.
///
/// Accepts a JSON array, a single JSON object, or (as a fallback) anything
/// else wrapped via [`DiagnosisSuggestion::unstructured`].
pub fn parse_suggestions(raw: &str) -> Vec<DiagnosisSuggestion> {
    let clean = strip_code_fences(raw);
    if let Ok(list) = serde_json::from_str::<Vec<DiagnosisSuggestion>>(&clean) {
        return list;
    }
    if let Ok(single) = serde_json::from_str::<DiagnosisSuggestion>(&clean) {
        return vec![single];
    }
    vec![DiagnosisSuggestion::unstructured(raw)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"diagnosis": "Jvara", "NAMASTE_code": "AYU-001", "reasoning": "r1",
         "ICD_11_TM2_mapping": "SK00", "ICD_11_Biomedicine_mapping": "MG26"},
        {"diagnosis": "Madhumeha", "NAMASTE_code": "AYU-014", "reasoning": "r2",
         "ICD_11_TM2_mapping": "SP90", "ICD_11_Biomedicine_mapping": "5A11"}
    ]"#;

    #[test]
    fn test_parses_bare_array() {
        let suggestions = parse_suggestions(PAYLOAD);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].diagnosis, "Madhumeha");
    }

    #[test]
    fn test_parses_fenced_array() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        let suggestions = parse_suggestions(&fenced);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_parses_fenced_without_language_tag() {
        let fenced = format!("```\n{PAYLOAD}\n```");
        assert_eq!(parse_suggestions(&fenced).len(), 2);
    }

    #[test]
    fn test_single_object_becomes_one_suggestion() {
        let one = r#"{"diagnosis": "Jvara", "NAMASTE_code": "AYU-001"}"#;
        let suggestions = parse_suggestions(one);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].namaste_code, "AYU-001");
    }

    #[test]
    fn test_garbage_degrades_to_synthetic_suggestion() {
        let raw = "The patient most likely has Jvara (fever).";
        let suggestions = parse_suggestions(raw);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].diagnosis, "Unstructured AI response");
        assert_eq!(suggestions[0].reasoning, raw);
    }

    #[test]
    fn test_strip_code_fences_trims_whitespace() {
        assert_eq!(strip_code_fences("```json\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("  [] "), "[]");
    }
}
