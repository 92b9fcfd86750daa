//! Section splitting for free-text analyses.
//!
//! The free-text prompt template asks for bold-marker section headers
//! (`**LIKE THIS:**`). This module is the single place that convention is
//! decoded; a prompt-template edit that changes the markers must be caught
//! by the tests here.

/// One section of a free-text analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` for body text appearing before the first recognized header.
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
}

/// Split a free-text analysis on bold-marker section headers.
///
/// A line whose leading `**…**` marker content ends with a colon starts a
/// new section; the colon is stripped from the heading and any text after
/// the closing marker becomes the section's first paragraph. All other
/// non-empty lines are body paragraphs of the current section.
#[must_use]
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        heading: None,
        paragraphs: Vec::new(),
    };

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((heading, rest)) = parse_header_line(trimmed) {
            if current.heading.is_some() || !current.paragraphs.is_empty() {
                sections.push(current);
            }
            current = Section {
                heading: Some(heading),
                paragraphs: Vec::new(),
            };
            if !rest.is_empty() {
                current.paragraphs.push(rest.to_string());
            }
        } else {
            current.paragraphs.push(trimmed.to_string());
        }
    }

    if current.heading.is_some() || !current.paragraphs.is_empty() {
        sections.push(current);
    }

    sections
}

/// `**HEADER:** trailing text` → `("HEADER", "trailing text")`.
///
/// The marker content must end with a colon to count as a header; plain
/// bold emphasis inside a sentence is left alone.
fn parse_header_line(line: &str) -> Option<(String, &str)> {
    let after_open = line.strip_prefix("**")?;
    let close = after_open.find("**")?;
    let inner = after_open[..close].trim();
    let rest = after_open[close + 2..].trim();
    let heading = inner.strip_suffix(':')?.trim();
    if heading.is_empty() {
        return None;
    }
    Some((heading.to_string(), rest))
}
