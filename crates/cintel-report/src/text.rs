//! Plain-text report rendering.

use cintel_core::Analysis;

use crate::{sanitize_filename_component, RenderedReport, ReportError, ReportMeta};

const BANNER: &str = "========================================";

/// Render the fixed-layout plain-text report.
///
/// Free-text and unparsed analyses carry their raw text verbatim as the
/// body; structured analyses render their pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if a structured analysis fails to
/// serialize.
pub fn render_text(meta: &ReportMeta, analysis: &Analysis) -> Result<RenderedReport, ReportError> {
    let body = match analysis.raw_text() {
        Some(text) => text.to_string(),
        None => serde_json::to_string_pretty(analysis)?,
    };

    let generated = meta.generated_at.format("%B %d, %Y at %I:%M %p");
    let report = format!(
        "COMPETITOR INTELLIGENCE REPORT\n\
        {BANNER}\n\
        \n\
        Competitor Analyzed: {name}\n\
        Source: YouTube Comment Analysis\n\
        Videos Analyzed: {videos}\n\
        Comments Analyzed: {comments}\n\
        Report Generated: {generated}\n\
        \n\
        {BANNER}\n\
        COMPETITIVE INTELLIGENCE ANALYSIS\n\
        {BANNER}\n\
        \n\
        {body}\n\
        \n\
        {BANNER}\n\
        Generated by Competitor Intelligence Analyzer\n",
        name = meta.competitor_name,
        videos = meta.total_videos,
        comments = meta.total_comments,
    );

    let filename = format!(
        "competitor_analysis_{}_{}.txt",
        sanitize_filename_component(&meta.competitor_name),
        meta.generated_at.format("%Y%m%d_%H%M%S")
    );

    Ok(RenderedReport {
        bytes: report.into_bytes(),
        filename,
        content_type: "text/plain",
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use cintel_core::Analysis;

    use super::*;

    fn meta() -> ReportMeta {
        ReportMeta {
            competitor_name: "Acme Soda".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap(),
            total_comments: 42,
            total_videos: 2,
        }
    }

    #[test]
    fn text_report_contains_name_count_and_verbatim_body() {
        let analysis = Analysis::Text("**SUMMARY:** customers like the taste".to_string());
        let report = render_text(&meta(), &analysis).expect("render");
        let content = String::from_utf8(report.bytes).expect("utf-8");

        assert!(content.contains("Competitor Analyzed: Acme Soda"));
        assert!(content.contains("Comments Analyzed: 42"));
        assert!(content.contains("**SUMMARY:** customers like the taste"));
        assert!(content.starts_with("COMPETITOR INTELLIGENCE REPORT"));
        assert!(content.trim_end().ends_with("Generated by Competitor Intelligence Analyzer"));
    }

    #[test]
    fn text_report_filename_embeds_sanitized_name_and_timestamp() {
        let analysis = Analysis::Text("body".to_string());
        let report = render_text(&meta(), &analysis).expect("render");
        assert_eq!(
            report.filename,
            "competitor_analysis_Acme_Soda_20260314_150926.txt"
        );
        assert_eq!(report.content_type, "text/plain");
    }

    #[test]
    fn text_report_is_deterministic() {
        let analysis = Analysis::Text("body".to_string());
        let first = render_text(&meta(), &analysis).expect("render");
        let second = render_text(&meta(), &analysis).expect("render");
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn unparsed_analysis_renders_raw_response() {
        let analysis = Analysis::Unparsed {
            error: "Could not parse analysis".to_string(),
            raw_response: "the raw model output".to_string(),
        };
        let report = render_text(&meta(), &analysis).expect("render");
        let content = String::from_utf8(report.bytes).expect("utf-8");
        assert!(content.contains("the raw model output"));
    }

    #[test]
    fn structured_analysis_renders_pretty_json_body() {
        let analysis: Analysis = serde_json::from_value(serde_json::json!({
            "sentiment_summary": {"positive_count": 1, "negative_count": 0, "neutral_count": 0, "total_comments": 1},
            "key_themes": {"positive_aspects": [], "negative_aspects": []},
            "product_insights": {"strengths": [], "weaknesses": [], "suggestions": []},
            "marketing_insights": []
        }))
        .expect("analysis");
        let report = render_text(&meta(), &analysis).expect("render");
        let content = String::from_utf8(report.bytes).expect("utf-8");
        assert!(content.contains("\"positive_count\": 1"));
    }
}
