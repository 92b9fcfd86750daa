//! PDF report rendering.
//!
//! The layout is computed in two stages: [`build_story`] flattens the
//! analysis into a sequence of typed blocks (pure, unit-testable), and a
//! small page writer paints those blocks with printpdf's built-in fonts,
//! handling wrapping and page breaks. Document dates are taken from the
//! report metadata, so identical inputs produce identical bytes.

use cintel_core::{Analysis, SentimentSummary, StructuredAnalysis};
use printpdf::{
    BuiltinFont, CustomPdfConformance, IndirectFontRef, Mm, PdfConformance, PdfDocument,
    PdfDocumentReference, PdfLayerReference,
};
use time::OffsetDateTime;

use crate::{sanitize_filename_component, sections, RenderedReport, ReportError, ReportMeta};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 18.0;
const USABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_LEFT;

const PT_TO_MM: f32 = 0.352_778;
/// Average glyph advance for Helvetica, as a fraction of the font size.
/// Built-in fonts carry no metrics we can query, so wrapping is estimated.
const AVG_CHAR_WIDTH: f32 = 0.5;
const LINE_SPACING: f32 = 1.45;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const SUBHEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

/// Up to this many verbatim quotes are shown per theme.
const SAMPLE_COMMENTS_PER_THEME: usize = 2;

/// One typed layout element, produced by [`build_story`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Paragraph(String),
    Bullet(String),
    Mono(String),
    Gap,
}

fn mm(value: f32) -> Mm {
    Mm(value.into())
}

/// Render the paginated PDF report.
///
/// # Errors
///
/// Returns [`ReportError::Pdf`] if document construction or serialization
/// fails.
pub fn render_pdf(meta: &ReportMeta, analysis: &Analysis) -> Result<RenderedReport, ReportError> {
    let story = build_story(meta, analysis);

    let (doc, page, layer) = PdfDocument::new(
        "Competitive Intelligence Report",
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "content",
    );

    // Stamp document dates from the report metadata instead of the wall
    // clock; re-rendering the same inputs must reproduce the same bytes.
    let date = OffsetDateTime::from_unix_timestamp(meta.generated_at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance::default()))
        .with_creation_date(date)
        .with_mod_date(date);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
        mono: doc.add_builtin_font(BuiltinFont::Courier).map_err(pdf_err)?,
    };

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN_TOP,
        };
        for block in &story {
            writer.paint_block(block, &fonts);
        }
    }

    let bytes = doc.save_to_bytes().map_err(pdf_err)?;

    let filename = format!(
        "Competitive_Intelligence_{}_{}.pdf",
        sanitize_filename_component(&meta.competitor_name),
        meta.generated_at.format("%Y%m%d")
    );

    Ok(RenderedReport {
        bytes,
        filename,
        content_type: "application/pdf",
    })
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

/// Flatten metadata plus analysis into layout blocks.
fn build_story(meta: &ReportMeta, analysis: &Analysis) -> Vec<Block> {
    let mut story = vec![
        Block::Title("Competitive Intelligence Report".to_string()),
        Block::Gap,
        Block::Paragraph(format!("Competitor Product: {}", meta.competitor_name)),
        Block::Paragraph(format!(
            "Report Generated: {}",
            meta.generated_at.format("%B %d, %Y")
        )),
        Block::Paragraph(format!("Videos Analyzed: {}", meta.total_videos)),
        Block::Paragraph(format!("Comments Analyzed: {}", meta.total_comments)),
        Block::Gap,
    ];

    match analysis {
        Analysis::Structured(structured) => push_structured(&mut story, structured),
        Analysis::Text(text) => push_free_text(&mut story, text),
        Analysis::Unparsed {
            error,
            raw_response,
        } => {
            story.push(Block::Heading("Analysis".to_string()));
            story.push(Block::Paragraph(error.clone()));
            story.push(Block::Gap);
            push_free_text(&mut story, raw_response);
        }
    }

    story
}

fn push_structured(story: &mut Vec<Block>, analysis: &StructuredAnalysis) {
    story.push(Block::Heading("Sentiment Overview".to_string()));
    for row in sentiment_table(&analysis.sentiment_summary) {
        story.push(Block::Mono(row));
    }
    story.push(Block::Gap);

    if !analysis.key_themes.positive_aspects.is_empty() {
        story.push(Block::Heading(
            "What Customers Love About This Competitor".to_string(),
        ));
        push_themes(story, &analysis.key_themes.positive_aspects);
    }

    if !analysis.key_themes.negative_aspects.is_empty() {
        story.push(Block::Heading(
            "Pain Points & Customer Frustrations".to_string(),
        ));
        push_themes(story, &analysis.key_themes.negative_aspects);
    }

    if !analysis.product_insights.strengths.is_empty() {
        story.push(Block::Heading("Competitor's Key Selling Points".to_string()));
        push_insight_entries(story, &analysis.product_insights.strengths);
    }

    if !analysis.product_insights.weaknesses.is_empty() {
        story.push(Block::Heading("Competitor's Vulnerabilities".to_string()));
        push_insight_entries(story, &analysis.product_insights.weaknesses);
    }

    if !analysis.marketing_insights.is_empty() {
        story.push(Block::Heading(
            "Strategic Marketing Opportunities".to_string(),
        ));
        for insight in &analysis.marketing_insights {
            story.push(Block::Bullet(insight.clone()));
        }
        story.push(Block::Gap);
    }

    if !analysis.product_insights.suggestions.is_empty() {
        story.push(Block::Heading("How You Can Differentiate".to_string()));
        for suggestion in &analysis.product_insights.suggestions {
            story.push(Block::Bullet(suggestion.clone()));
        }
    }
}

fn push_themes(story: &mut Vec<Block>, themes: &[cintel_core::Theme]) {
    for theme in themes {
        story.push(Block::Subheading(theme.theme.clone()));
        story.push(Block::Paragraph(format!(
            "Mentioned {} times",
            theme.mentions
        )));
        for quote in theme.sample_comments.iter().take(SAMPLE_COMMENTS_PER_THEME) {
            story.push(Block::Bullet(format!("\"{quote}\"")));
        }
        story.push(Block::Gap);
    }
}

fn push_insight_entries(story: &mut Vec<Block>, entries: &[cintel_core::InsightEntry]) {
    for entry in entries {
        story.push(Block::Subheading(entry.feature.clone()));
        if !entry.description.is_empty() {
            story.push(Block::Paragraph(entry.description.clone()));
        }
        story.push(Block::Paragraph(format!("Frequency: {}", entry.frequency)));
        story.push(Block::Gap);
    }
}

fn push_free_text(story: &mut Vec<Block>, text: &str) {
    for section in sections::split_sections(text) {
        if let Some(heading) = section.heading {
            story.push(Block::Heading(heading));
        }
        for paragraph in section.paragraphs {
            match paragraph.strip_prefix("- ") {
                Some(item) => story.push(Block::Bullet(item.to_string())),
                None => story.push(Block::Paragraph(paragraph)),
            }
        }
        story.push(Block::Gap);
    }
}

/// Courier-aligned sentiment breakdown rows.
fn sentiment_table(summary: &SentimentSummary) -> Vec<String> {
    let mut rows = vec![
        format!("{:<22}{:>8}", "Metric", "Count"),
        "-".repeat(30),
    ];
    for (label, count) in [
        ("Positive Comments", summary.positive_count),
        ("Negative Comments", summary.negative_count),
        ("Neutral Comments", summary.neutral_count),
    ] {
        rows.push(format!("{label:<22}{count:>8}"));
    }
    rows
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

/// Tracks the vertical cursor on the current page and starts a fresh page
/// when a block would cross the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn paint_block(&mut self, block: &Block, fonts: &Fonts) {
        match block {
            Block::Title(text) => {
                let width = estimated_width_mm(text, TITLE_SIZE);
                let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN_LEFT);
                self.advance(line_height_mm(TITLE_SIZE));
                self.layer
                    .use_text(text.clone(), TITLE_SIZE.into(), mm(x), mm(self.y), &fonts.bold);
            }
            Block::Heading(text) => {
                self.y -= 4.0;
                self.write_wrapped(text, HEADING_SIZE, &fonts.bold);
            }
            Block::Subheading(text) => {
                self.y -= 2.0;
                self.write_wrapped(text, SUBHEADING_SIZE, &fonts.bold);
            }
            Block::Paragraph(text) => {
                self.write_wrapped(text, BODY_SIZE, &fonts.regular);
            }
            Block::Bullet(text) => {
                self.write_wrapped(&format!("- {text}"), BODY_SIZE, &fonts.regular);
            }
            Block::Mono(text) => {
                self.advance(line_height_mm(BODY_SIZE));
                self.layer.use_text(
                    text.clone(),
                    BODY_SIZE.into(),
                    mm(MARGIN_LEFT),
                    mm(self.y),
                    &fonts.mono,
                );
            }
            Block::Gap => {
                self.y -= 6.0;
            }
        }
    }

    fn write_wrapped(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        for line in wrap_words(text, max_chars_per_line(size)) {
            self.advance(line_height_mm(size));
            self.layer
                .use_text(line, size.into(), mm(MARGIN_LEFT), mm(self.y), font);
        }
    }

    /// Move the cursor down one line, breaking to a new page first when the
    /// line would land below the bottom margin.
    fn advance(&mut self, line_height: f32) {
        if self.y - line_height < MARGIN_BOTTOM {
            let (page, layer) = self
                .doc
                .add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
        }
        self.y -= line_height;
    }
}

fn line_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

#[allow(clippy::cast_precision_loss)]
fn estimated_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * AVG_CHAR_WIDTH * size * PT_TO_MM
}

fn max_chars_per_line(size: f32) -> usize {
    let per_char = AVG_CHAR_WIDTH * size * PT_TO_MM;
    let chars = (USABLE_WIDTH / per_char).floor();
    if chars < 1.0 {
        1
    } else {
        chars as usize
    }
}

/// Greedy word wrap by estimated character budget. A single word longer
/// than the budget stays on its own (over-long) line.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use cintel_core::Analysis;

    use super::*;

    fn meta() -> ReportMeta {
        ReportMeta {
            competitor_name: "Acme".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap(),
            total_comments: 30,
            total_videos: 1,
        }
    }

    fn structured_analysis() -> Analysis {
        serde_json::from_value(serde_json::json!({
            "sentiment_summary": {"positive_count": 18, "negative_count": 7, "neutral_count": 5, "total_comments": 30},
            "key_themes": {
                "positive_aspects": [
                    {"theme": "flavor", "mentions": 9, "sample_comments": ["so good", "tastes great", "a third quote"]}
                ],
                "negative_aspects": [
                    {"theme": "price", "mentions": 4, "sample_comments": ["too expensive"]}
                ]
            },
            "product_insights": {
                "strengths": [
                    {"feature": "brand loyalty", "description": "repeat buyers", "frequency": 6}
                ],
                "weaknesses": [
                    {"feature": "availability", "description": "often out of stock", "frequency": 3}
                ],
                "suggestions": ["stock more widely"]
            },
            "marketing_insights": ["target value shoppers"]
        }))
        .expect("analysis")
    }

    #[test]
    fn story_opens_with_title_and_metadata() {
        let story = build_story(&meta(), &Analysis::Text("body".to_string()));
        assert_eq!(
            story[0],
            Block::Title("Competitive Intelligence Report".to_string())
        );
        assert!(story.contains(&Block::Paragraph("Competitor Product: Acme".to_string())));
        assert!(story.contains(&Block::Paragraph("Comments Analyzed: 30".to_string())));
    }

    #[test]
    fn structured_story_has_sentiment_rows_and_sections() {
        let story = build_story(&meta(), &structured_analysis());

        let mono_rows: Vec<&Block> = story
            .iter()
            .filter(|b| matches!(b, Block::Mono(_)))
            .collect();
        assert_eq!(mono_rows.len(), 5, "header, rule, and three count rows");
        assert!(matches!(&mono_rows[2], Block::Mono(row) if row.contains("Positive Comments") && row.contains("18")));

        assert!(story.contains(&Block::Heading(
            "What Customers Love About This Competitor".to_string()
        )));
        assert!(story.contains(&Block::Heading("Competitor's Vulnerabilities".to_string())));
        assert!(story.contains(&Block::Bullet("target value shoppers".to_string())));
        assert!(story.contains(&Block::Bullet("stock more widely".to_string())));
    }

    #[test]
    fn themes_cap_sample_comments_at_two() {
        let story = build_story(&meta(), &structured_analysis());
        let quotes: Vec<&Block> = story
            .iter()
            .filter(|b| matches!(b, Block::Bullet(text) if text.starts_with('"')))
            .collect();
        // 3 samples on the positive theme capped to 2, plus 1 negative sample.
        assert_eq!(quotes.len(), 3);
        assert!(!story.contains(&Block::Bullet("\"a third quote\"".to_string())));
    }

    #[test]
    fn free_text_story_splits_headers_and_bullets() {
        let text = "**WHAT CUSTOMERS LOVE ABOUT ACME:**\n- taste\nplain line";
        let story = build_story(&meta(), &Analysis::Text(text.to_string()));
        assert!(story.contains(&Block::Heading("WHAT CUSTOMERS LOVE ABOUT ACME".to_string())));
        assert!(story.contains(&Block::Bullet("taste".to_string())));
        assert!(story.contains(&Block::Paragraph("plain line".to_string())));
    }

    #[test]
    fn unparsed_story_keeps_error_and_raw_text() {
        let story = build_story(
            &meta(),
            &Analysis::Unparsed {
                error: "Could not parse analysis".to_string(),
                raw_response: "raw output".to_string(),
            },
        );
        assert!(story.contains(&Block::Paragraph("Could not parse analysis".to_string())));
        assert!(story.contains(&Block::Paragraph("raw output".to_string())));
    }

    #[test]
    fn wrap_words_respects_budget_and_order() {
        let lines = wrap_words("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn wrap_words_keeps_overlong_word_whole() {
        let lines = wrap_words("supercalifragilistic", 5);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn render_pdf_produces_pdf_bytes() {
        let report = render_pdf(&meta(), &structured_analysis()).expect("render");
        assert!(report.bytes.starts_with(b"%PDF-"));
        assert_eq!(report.content_type, "application/pdf");
        assert_eq!(report.filename, "Competitive_Intelligence_Acme_20260314.pdf");
    }

    #[test]
    fn render_pdf_is_deterministic_for_identical_inputs() {
        let first = render_pdf(&meta(), &structured_analysis()).expect("render");
        let second = render_pdf(&meta(), &structured_analysis()).expect("render");
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn render_pdf_handles_long_free_text_across_pages() {
        let long_text = (0..400)
            .map(|i| format!("Sentence number {i} about the competitor."))
            .collect::<Vec<_>>()
            .join(" ");
        let report = render_pdf(&meta(), &Analysis::Text(long_text)).expect("render");
        assert!(report.bytes.starts_with(b"%PDF-"));
    }
}
