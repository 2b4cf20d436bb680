use vidlex_model::{ContentDetail, TextChunk};

/// Subtitle lines shown over the active video.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubtitleLines {
    pub transcript: String,
    pub translation: String,
}

impl SubtitleLines {
    pub fn at(detail: &ContentDetail, time: f64) -> Self {
        Self {
            transcript: find_chunk_text(detail.transcript_chunks(), time)
                .to_string(),
            translation: find_chunk_text(detail.translation_chunks(), time)
                .to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty() && self.translation.is_empty()
    }
}

/// Text of the chunk playing at `time`.
///
/// The first chunk whose window contains `time` wins; in a gap (or past the
/// end) the latest chunk that has already started is kept on screen.
pub fn find_chunk_text(chunks: &[TextChunk], time: f64) -> &str {
    if let Some(chunk) = chunks.iter().find(|chunk| chunk.contains(time)) {
        return &chunk.text;
    }
    chunks
        .iter()
        .rev()
        .find(|chunk| time >= chunk.start())
        .map(|chunk| chunk.text.as_str())
        .unwrap_or("")
}
