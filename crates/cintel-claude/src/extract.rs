//! Response interpretation: free text, or an embedded JSON object with a
//! raw-text fallback.

use cintel_core::{Analysis, AnalysisMode, StructuredAnalysis};

/// Locate the first top-level brace-delimited JSON object substring.
///
/// Greedy match from the first `{` to the last `}`, which tolerates prose
/// before and after the object. A response with multiple JSON fragments or
/// stray braces in trailing prose can mis-capture; the parse failure then
/// lands in the [`Analysis::Unparsed`] fallback rather than an error.
#[must_use]
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Interpret a generation-API response according to the deployment's
/// analysis mode.
///
/// Free-text mode returns the response verbatim. Structured mode extracts
/// and parses the embedded JSON object; any failure degrades to
/// [`Analysis::Unparsed`] carrying the raw text so callers can still show
/// something.
#[must_use]
pub fn interpret_response(text: &str, mode: AnalysisMode) -> Analysis {
    match mode {
        AnalysisMode::FreeText => Analysis::Text(text.to_string()),
        AnalysisMode::Structured => parse_structured(text),
    }
}

fn parse_structured(text: &str) -> Analysis {
    let parsed = extract_json_block(text)
        .ok_or_else(|| "no JSON object found in response".to_string())
        .and_then(|block| {
            serde_json::from_str::<StructuredAnalysis>(block).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(structured) => Analysis::Structured(structured),
        Err(reason) => {
            tracing::warn!(reason = %reason, "falling back to raw analysis text");
            Analysis::Unparsed {
                error: format!("Could not parse analysis: {reason}"),
                raw_response: text.to_string(),
            }
        }
    }
}
