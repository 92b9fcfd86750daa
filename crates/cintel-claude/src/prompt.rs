//! The analysis prompt templates.
//!
//! The template wording is part of the contract, not free text: the bold
//! section markers in the free-text template are what the report renderer
//! splits on, and the JSON schema in the structured template is what
//! [`cintel_core::StructuredAnalysis`] deserializes. Edits here must move in
//! lockstep with both.

use cintel_core::{AnalysisMode, Comment};

/// At most this many comments are interpolated into a prompt, in the order
/// the comments API returned them.
pub const MAX_PROMPT_COMMENTS: usize = 30;

/// Build the full prompt for one analysis request.
#[must_use]
pub fn build_prompt(competitor_name: &str, comments: &[Comment], mode: AnalysisMode) -> String {
    let comments_text = numbered_comments(comments);
    match mode {
        AnalysisMode::FreeText => free_text_prompt(competitor_name, &comments_text),
        AnalysisMode::Structured => structured_prompt(competitor_name, &comments_text),
    }
}

/// `Comment N: <text>` lines, newline-joined, capped at
/// [`MAX_PROMPT_COMMENTS`], input order preserved.
fn numbered_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .take(MAX_PROMPT_COMMENTS)
        .enumerate()
        .map(|(i, comment)| format!("Comment {}: {}", i + 1, comment.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn free_text_prompt(competitor_name: &str, comments_text: &str) -> String {
    let upper = competitor_name.to_uppercase();
    format!(
        "You are a competitive intelligence analyst for a marketing team. Analyze these YouTube comments about {competitor_name} and provide strategic insights.\n\
        \n\
        Comments to analyze:\n\
        {comments_text}\n\
        \n\
        Please provide a comprehensive competitive analysis in the following structure:\n\
        \n\
        **WHAT CUSTOMERS LOVE ABOUT {upper}:**\n\
        - List specific features, benefits, or aspects customers praise\n\
        - Include direct quotes when relevant\n\
        \n\
        **PAIN POINTS & CUSTOMER FRUSTRATIONS:**\n\
        - Identify complaints, issues, or negative feedback\n\
        - Look for recurring problems or unmet needs\n\
        \n\
        **{upper}'S KEY SELLING POINTS:**\n\
        - What value propositions are customers responding to?\n\
        - What differentiators are mentioned?\n\
        \n\
        **{upper}'S VULNERABILITIES:**\n\
        - Areas where they're failing customers\n\
        - Gaps in their offering or service\n\
        \n\
        **STRATEGIC MARKETING OPPORTUNITIES:**\n\
        - How can we position against these weaknesses?\n\
        - What customer needs are unmet?\n\
        \n\
        **HOW YOU CAN DIFFERENTIATE:**\n\
        - Specific recommendations for competitive advantage\n\
        - Areas to focus product development or marketing\n\
        \n\
        Keep insights actionable and business-focused. Use bullet points for clarity."
    )
}

fn structured_prompt(competitor_name: &str, comments_text: &str) -> String {
    format!(
        "Analyze these YouTube comments about the competitor product: {competitor_name}\n\
        \n\
        Provide competitive intelligence insights for a marketing team that wants to understand how this competitor is being perceived by customers.\n\
        \n\
        Comments:\n\
        {comments_text}\n\
        \n\
        Please provide a comprehensive competitive analysis in the following JSON format:\n\
        \n\
        {{\n\
        \x20   \"sentiment_summary\": {{\n\
        \x20       \"positive_count\": 0,\n\
        \x20       \"negative_count\": 0,\n\
        \x20       \"neutral_count\": 0,\n\
        \x20       \"total_comments\": 0\n\
        \x20   }},\n\
        \x20   \"key_themes\": {{\n\
        \x20       \"positive_aspects\": [\n\
        \x20           {{\"theme\": \"what customers love about this competitor\", \"mentions\": 0, \"sample_comments\": [\"comment1\", \"comment2\"]}}\n\
        \x20       ],\n\
        \x20       \"negative_aspects\": [\n\
        \x20           {{\"theme\": \"customer pain points and frustrations\", \"mentions\": 0, \"sample_comments\": [\"comment1\", \"comment2\"]}}\n\
        \x20       ]\n\
        \x20   }},\n\
        \x20   \"product_insights\": {{\n\
        \x20       \"strengths\": [\n\
        \x20           {{\"feature\": \"competitor's key selling point\", \"description\": \"why customers choose this competitor\", \"frequency\": 0}}\n\
        \x20       ],\n\
        \x20       \"weaknesses\": [\n\
        \x20           {{\"feature\": \"competitor vulnerability\", \"description\": \"where this competitor falls short\", \"frequency\": 0}}\n\
        \x20       ],\n\
        \x20       \"suggestions\": [\n\
        \x20           \"how your company can differentiate and compete\",\n\
        \x20           \"market opportunities to exploit\"\n\
        \x20       ]\n\
        \x20   }},\n\
        \x20   \"marketing_insights\": [\n\
        \x20       \"strategic opportunities for competitive positioning\",\n\
        \x20       \"messaging gaps you can exploit\",\n\
        \x20       \"market segments where competitor is weak\"\n\
        \x20   ]\n\
        }}\n\
        \n\
        Focus on competitive intelligence: competitor strengths to be aware of, weaknesses to exploit, customer expectations, pricing perceptions, and opportunities for differentiation. Frame everything from the perspective of helping a marketing team compete against this product."
    )
}
