use serde::{Deserialize, Serialize};

/// Result of one generation-API analysis call.
///
/// Serialized untagged so the `/analyze` response carries either the raw
/// analysis string, the structured object, or the parse-failure fallback
/// under the same `analysis` key, and export requests round-trip all three.
/// Variant order matters for deserialization: the structured shape is the
/// most specific, the bare string the least.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Structured(StructuredAnalysis),
    /// The model response contained no parseable JSON block; the raw text is
    /// kept so callers can still show something.
    Unparsed { error: String, raw_response: String },
    Text(String),
}

impl Analysis {
    #[must_use]
    pub fn as_structured(&self) -> Option<&StructuredAnalysis> {
        match self {
            Analysis::Structured(s) => Some(s),
            _ => None,
        }
    }

    /// The raw analysis text, for renderers that want a verbatim body.
    /// Structured analyses have no single text body and return `None`.
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Analysis::Text(s) => Some(s),
            Analysis::Unparsed { raw_response, .. } => Some(raw_response),
            Analysis::Structured(_) => None,
        }
    }
}

/// Structured competitive analysis with fixed section keys.
///
/// All four top-level keys are required: a response missing one is treated
/// as unparseable rather than silently half-filled. Inner lists default to
/// empty when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub sentiment_summary: SentimentSummary,
    pub key_themes: KeyThemes,
    pub product_insights: ProductInsights,
    pub marketing_insights: Vec<String>,
}

/// Comment counts by sentiment class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub total_comments: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyThemes {
    #[serde(default)]
    pub positive_aspects: Vec<Theme>,
    #[serde(default)]
    pub negative_aspects: Vec<Theme>,
}

/// A recurring topic in the comments, with up to a few verbatim quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub theme: String,
    #[serde(default)]
    pub mentions: u64,
    #[serde(default)]
    pub sample_comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInsights {
    #[serde(default)]
    pub strengths: Vec<InsightEntry>,
    #[serde(default)]
    pub weaknesses: Vec<InsightEntry>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A competitor strength or vulnerability with how often it came up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightEntry {
    pub feature: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: u64,
}
