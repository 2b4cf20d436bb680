use crate::content::TimeWindow;
use crate::error::ModelError;
use crate::ids::ContentId;

/// A phrase occurrence inside a video, returned by phrase search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PhraseSnippet {
    pub id: String,
    pub content_id: ContentId,
    pub video_name: String,
    pub video_url: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub matched_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub context_text: String,
    pub phrase: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_seconds: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub translation_matched_text: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub translation_context_text: Option<String>,
}

impl PhraseSnippet {
    pub fn window(&self) -> Result<TimeWindow, ModelError> {
        TimeWindow::new(self.start_seconds, self.end_seconds)
    }

    /// Text shown over the snippet: context, else the match, else the
    /// phrase itself.
    pub fn display_text(&self) -> &str {
        if !self.context_text.is_empty() {
            &self.context_text
        } else if !self.matched_text.is_empty() {
            &self.matched_text
        } else {
            &self.phrase
        }
    }

    /// Stable list key; one video can hold several snippets.
    pub fn list_key(&self, index: usize) -> String {
        format!("{}-{}-{}", self.content_id, self.start_seconds, index)
    }
}

/// Response of `GET video-learning/search`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PhraseSearchResult {
    pub items: Vec<PhraseSnippet>,
    pub phrase: String,
    pub returned: usize,
    pub total: usize,
    pub has_more: bool,
    pub next_cursor: Option<String>,
    pub page_size: usize,
}
