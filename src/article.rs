//! Article representation handed from the extractor to the packager.

use crate::sanitize::{SanitizeConfig, Sanitizer, text_content};

/// Byline used when the extractor found no author.
pub const UNKNOWN_BYLINE: &str = "Unknown";

/// Reading speed used for [`Article::reading_time`], in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

/// Raw output of the content extractor, before sanitization.
#[derive(Debug, Clone, Default)]
pub struct ExtractedArticle {
    pub title: String,
    pub byline: Option<String>,
    /// Body markup fragment, possibly still carrying images and scripts.
    pub content: String,
}

/// A single article ready to be packaged.
///
/// `content` is a sanitized fragment; the statistics are computed once at
/// construction and carried along for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub byline: String,
    pub content: String,
    pub text_content: String,
    pub word_count: usize,
    /// Estimated reading time in whole minutes, rounded up.
    pub reading_time: usize,
}

impl Article {
    /// Build an article from an already-sanitized body fragment.
    pub fn new(
        title: impl Into<String>,
        byline: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let text_content = text_content(&content);
        let word_count = count_words(&text_content);
        Self {
            title: title.into(),
            byline: byline.into(),
            content,
            text_content,
            word_count,
            reading_time: reading_time(word_count),
        }
    }

    /// Build an article from raw extractor output.
    ///
    /// Strips media, sanitizes the body and substitutes [`UNKNOWN_BYLINE`]
    /// for a missing or blank byline.
    pub fn from_extracted(extracted: ExtractedArticle) -> Self {
        let sanitizer = Sanitizer::new().with_config(SanitizeConfig { strip_media: true });
        let content = sanitizer.sanitize(&extracted.content);

        let byline = extracted
            .byline
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| UNKNOWN_BYLINE.to_string());

        Self::new(extracted.title, byline, content)
    }
}

/// Count whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `word_count` words, rounded up.
pub fn reading_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}
