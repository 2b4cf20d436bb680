use crate::domains::feed;

#[derive(Clone)]
pub enum Message {
    // Lifecycle
    Mounted,
    Unmounted,
    FocusChanged(bool),

    // Scrolling
    Layout { height: f32 },
    Scrolled { offset: f32 },
    GestureStarted { offset: f32 },
    GestureEnded { offset: f32 },
    EndReached,

    // Playback
    TogglePlayback,
    PlayerReady,
    TimeUpdate(f64),

    /// Like or unlike the active item
    ToggleLike,

    Feed(feed::Message),
}

impl From<feed::Message> for Message {
    fn from(msg: feed::Message) -> Self {
        Message::Feed(msg)
    }
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted => "Video::Mounted",
            Self::Unmounted => "Video::Unmounted",
            Self::FocusChanged(_) => "Video::FocusChanged",
            Self::Layout { .. } => "Video::Layout",
            Self::Scrolled { .. } => "Video::Scrolled",
            Self::GestureStarted { .. } => "Video::GestureStarted",
            Self::GestureEnded { .. } => "Video::GestureEnded",
            Self::EndReached => "Video::EndReached",
            Self::TogglePlayback => "Video::TogglePlayback",
            Self::PlayerReady => "Video::PlayerReady",
            Self::TimeUpdate(_) => "Video::TimeUpdate",
            Self::ToggleLike => "Video::ToggleLike",
            Self::Feed(msg) => msg.name(),
        }
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FocusChanged(focused) => {
                write!(f, "Video::FocusChanged({})", focused)
            }
            Self::Layout { height } => write!(f, "Video::Layout({})", height),
            Self::Scrolled { offset } => write!(f, "Video::Scrolled({})", offset),
            Self::GestureStarted { offset } => {
                write!(f, "Video::GestureStarted({})", offset)
            }
            Self::GestureEnded { offset } => {
                write!(f, "Video::GestureEnded({})", offset)
            }
            Self::TimeUpdate(t) => write!(f, "Video::TimeUpdate({:.2})", t),
            Self::Feed(msg) => std::fmt::Debug::fmt(msg, f),
            other => f.write_str(other.name()),
        }
    }
}
