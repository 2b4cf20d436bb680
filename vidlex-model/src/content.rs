//! Lazily fetched per-item detail: transcript and translation chunks.

use crate::error::ModelError;

/// A `(start, end, text)` subtitle line, times in seconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextChunk {
    pub timestamp: [f64; 2],
    pub text: String,
}

impl TextChunk {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp: [start, end],
            text: text.into(),
        }
    }

    pub fn start(&self) -> f64 {
        self.timestamp[0]
    }

    pub fn end(&self) -> f64 {
        self.timestamp[1]
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start() && time <= self.end()
    }
}

/// Ordered chunk list of one language track.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transcript {
    #[cfg_attr(feature = "serde", serde(default))]
    pub chunks: Vec<TextChunk>,
}

impl Transcript {
    pub fn from_chunks(chunks: Vec<TextChunk>) -> Self {
        Self { chunks }
    }
}

/// Detail payload of `GET video-learning/{id}`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentDetail {
    #[cfg_attr(feature = "serde", serde(default))]
    pub transcription: Option<Transcript>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub translation: Option<Transcript>,
}

impl ContentDetail {
    pub fn transcript_chunks(&self) -> &[TextChunk] {
        self.transcription
            .as_ref()
            .map(|t| t.chunks.as_slice())
            .unwrap_or(&[])
    }

    pub fn translation_chunks(&self) -> &[TextChunk] {
        self.translation
            .as_ref()
            .map(|t| t.chunks.as_slice())
            .unwrap_or(&[])
    }
}

/// Playback window for snippet playback, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self, ModelError> {
        if !(start <= end) {
            return Err(ModelError::InvalidTimeWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: start.max(0.0),
            end,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
