//! Feed filter values and their query-string encoding.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// CEFR proficiency level used to filter the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProficiencyLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl ProficiencyLevel {
    pub fn all() -> &'static [ProficiencyLevel] {
        use ProficiencyLevel::*;
        &[A1, A2, B1, B2, C1, C2]
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            ProficiencyLevel::A1 => "A1",
            ProficiencyLevel::A2 => "A2",
            ProficiencyLevel::B1 => "B1",
            ProficiencyLevel::B2 => "B2",
            ProficiencyLevel::C1 => "C1",
            ProficiencyLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProficiencyLevel::all()
            .iter()
            .copied()
            .find(|level| level.api_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownProficiencyLevel(s.to_string()))
    }
}

/// Speech tempo bucket assigned by the content analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeechSpeed {
    Slow,
    Normal,
    Fast,
}

impl SpeechSpeed {
    pub fn all() -> &'static [SpeechSpeed] {
        &[SpeechSpeed::Slow, SpeechSpeed::Normal, SpeechSpeed::Fast]
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            SpeechSpeed::Slow => "slow",
            SpeechSpeed::Normal => "normal",
            SpeechSpeed::Fast => "fast",
        }
    }
}

impl fmt::Display for SpeechSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for SpeechSpeed {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SpeechSpeed::all()
            .iter()
            .copied()
            .find(|speed| speed.api_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownSpeechSpeed(s.to_string()))
    }
}

/// Moderation state filter. Only honoured by the server for admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModerationFilter {
    #[default]
    All,
    Moderated,
    Unmoderated,
}

impl ModerationFilter {
    pub fn api_name(&self) -> &'static str {
        match self {
            ModerationFilter::All => "all",
            ModerationFilter::Moderated => "moderated",
            ModerationFilter::Unmoderated => "unmoderated",
        }
    }
}

impl FromStr for ModerationFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ModerationFilter::All),
            "moderated" => Ok(ModerationFilter::Moderated),
            "unmoderated" => Ok(ModerationFilter::Unmoderated),
            _ => Err(ModelError::UnknownModerationFilter(s.to_string())),
        }
    }
}

/// Active filter set of the feed.
///
/// `None` for a set means "all". Any change to a filter value invalidates
/// the loaded feed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FeedFilters {
    pub cefr_levels: Option<Vec<ProficiencyLevel>>,
    pub speech_speeds: Option<Vec<SpeechSpeed>>,
    pub show_adult_content: bool,
    pub moderation_filter: Option<ModerationFilter>,
}

impl Default for FeedFilters {
    fn default() -> Self {
        Self {
            cefr_levels: None,
            speech_speeds: None,
            show_adult_content: true,
            moderation_filter: None,
        }
    }
}

impl FeedFilters {
    pub fn with_levels(mut self, levels: Vec<ProficiencyLevel>) -> Self {
        self.cefr_levels = Some(levels);
        self
    }

    pub fn with_speech_speeds(mut self, speeds: Vec<SpeechSpeed>) -> Self {
        self.speech_speeds = Some(speeds);
        self
    }

    pub fn with_adult_content(mut self, show: bool) -> Self {
        self.show_adult_content = show;
        self
    }

    pub fn with_moderation(mut self, filter: ModerationFilter) -> Self {
        self.moderation_filter = Some(filter);
        self
    }

    /// Query parameters for the feed endpoint, excluding paging.
    ///
    /// Empty level/speed sets are omitted, which the server reads as "all".
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (
                "moderationFilter",
                self.moderation_filter
                    .unwrap_or_default()
                    .api_name()
                    .to_string(),
            ),
            (
                "showAdultContent",
                if self.show_adult_content { "true" } else { "false" }
                    .to_string(),
            ),
        ];

        if let Some(levels) = self.cefr_levels.as_deref()
            && !levels.is_empty()
        {
            pairs.push(("cefrLevels", join_names(levels, |l| l.api_name())));
        }
        if let Some(speeds) = self.speech_speeds.as_deref()
            && !speeds.is_empty()
        {
            pairs
                .push(("speechSpeeds", join_names(speeds, |s| s.api_name())));
        }
        pairs
    }
}

fn join_names<T>(values: &[T], name: impl Fn(&T) -> &'static str) -> String {
    values.iter().map(name).collect::<Vec<_>>().join(",")
}
