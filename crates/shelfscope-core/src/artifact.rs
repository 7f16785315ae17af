use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::key::BookKey;

// ─── SeasonArtifact ─────────────────────────────────────────

/// Compiled season document, one per (year, season).
///
/// Produced by an external scraping pipeline, so the shape is not under our
/// control: every field hydrates leniently, and missing or mistyped sections
/// collapse to their defaults instead of failing the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonArtifact {
    #[serde(deserialize_with = "lenient")]
    pub season: SeasonMeta,

    #[serde(deserialize_with = "lenient")]
    pub generated_at: String,

    #[serde(deserialize_with = "lenient")]
    pub achievements: Vec<Achievement>,

    #[serde(deserialize_with = "lenient")]
    pub dedupe: DedupeSection,
}

impl SeasonArtifact {
    /// Parse a season document from raw JSON text.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonMeta {
    #[serde(deserialize_with = "lenient")]
    pub name: String,

    /// The compiler stringifies the year; older artifacts carry a number.
    #[serde(deserialize_with = "year_string")]
    pub year: String,
}

impl SeasonMeta {
    /// "Summer 2025"-style label for headers and status lines.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.year).trim().to_string()
    }
}

// ─── Achievement ────────────────────────────────────────────

/// A named reading-challenge category with its qualifying books.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    #[serde(deserialize_with = "lenient")]
    pub name: String,

    #[serde(deserialize_with = "lenient")]
    pub source_url: String,

    /// Book total reported by the scraper; may disagree with `books.len()`
    /// when the scrape was truncated.
    #[serde(deserialize_with = "lenient")]
    pub book_count: Option<u64>,

    #[serde(deserialize_with = "lenient")]
    pub books: Vec<BookRef>,
}

impl Achievement {
    /// Reported book total, falling back to the actual list length.
    pub fn listed_count(&self) -> usize {
        self.book_count
            .map(|n| n as usize)
            .unwrap_or(self.books.len())
    }
}

/// One book as listed under a single achievement. Not deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRef {
    #[serde(deserialize_with = "lenient")]
    pub title: String,

    #[serde(deserialize_with = "lenient")]
    pub author: String,

    #[serde(deserialize_with = "lenient")]
    pub link: String,

    #[serde(deserialize_with = "lenient")]
    pub cover: String,
}

impl BookRef {
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }
}

// ─── Dedupe section ─────────────────────────────────────────

/// Precomputed duplicate groups emitted by the season compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeSection {
    #[serde(deserialize_with = "lenient")]
    pub duplicates_by_title_author: Vec<DuplicateGroup>,
}

/// Achievement names sharing one normalized (title, author) key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateGroup {
    #[serde(deserialize_with = "lenient")]
    pub title: String,

    #[serde(deserialize_with = "lenient")]
    pub author: String,

    #[serde(deserialize_with = "lenient")]
    pub achievements: Vec<String>,
}

// ─── Lenient hydration ──────────────────────────────────────

/// Deserialize a field, substituting the default on any type mismatch.
/// Null strings, numeric years, non-array lists and similar producer quirks
/// hydrate to usable values instead of poisoning the document.
fn lenient<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: DeserializeOwned + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn year_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

// ─── Tests ──────────────────────────────────────────────────
