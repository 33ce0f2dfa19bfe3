//! Best-effort recovery of a JSON payload from free-text model output
//!
//! Model responses often wrap the JSON in markdown fences or lead with
//! prose ("Here is the result: ..."). This module strips that noise. It
//! never validates the result; JSON-parsing the sanitized string may
//! still fail, and that failure belongs to the caller.

/// Recover a parseable-looking JSON payload from a free-text response.
///
/// Pure and total: the worst case returns the trimmed input unchanged.
/// Idempotent: `sanitize_json(sanitize_json(x)) == sanitize_json(x)`.
pub fn sanitize_json(raw: &str) -> String {
    // Strip markdown code fences, tagged or not
    let unfenced = if raw.contains("```json") {
        raw.replace("```json", "").replace("```", "")
    } else if raw.contains("```") {
        raw.replace("```", "")
    } else {
        raw.to_string()
    };

    let trimmed = unfenced.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed.to_string();
    }

    // Leading prose: slice from the first `{` or `[`, whichever comes first
    match (trimmed.find('{'), trimmed.find('[')) {
        (Some(obj), Some(arr)) => trimmed[obj.min(arr)..].to_string(),
        (Some(obj), None) => trimmed[obj..].to_string(),
        (None, Some(arr)) => trimmed[arr..].to_string(),
        (None, None) => trimmed.to_string(),
    }
}
