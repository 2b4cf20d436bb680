use vidlex_model::PhraseSearchResult;

#[derive(Clone)]
pub enum Message {
    Search(String),
    Results {
        query_id: u64,
        result: Result<PhraseSearchResult, String>,
    },

    Layout { width: f32 },
    MomentumEnded { offset_x: f32 },

    FocusChanged(bool),
    PlayerReady,
    TimeUpdate(f64),
    TogglePlayback,
    Closed,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "Snippets::Search",
            Self::Results { .. } => "Snippets::Results",
            Self::Layout { .. } => "Snippets::Layout",
            Self::MomentumEnded { .. } => "Snippets::MomentumEnded",
            Self::FocusChanged(_) => "Snippets::FocusChanged",
            Self::PlayerReady => "Snippets::PlayerReady",
            Self::TimeUpdate(_) => "Snippets::TimeUpdate",
            Self::TogglePlayback => "Snippets::TogglePlayback",
            Self::Closed => "Snippets::Closed",
        }
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(phrase) => write!(f, "Snippets::Search({:?})", phrase),
            Self::Results { query_id, result } => match result {
                Ok(result) => write!(
                    f,
                    "Snippets::Results(#{}, {} items)",
                    query_id,
                    result.items.len()
                ),
                Err(e) => write!(f, "Snippets::Results(#{}, Err: {})", query_id, e),
            },
            Self::MomentumEnded { offset_x } => {
                write!(f, "Snippets::MomentumEnded({})", offset_x)
            }
            other => f.write_str(other.name()),
        }
    }
}
