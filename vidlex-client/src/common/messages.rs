//! Message routing and effect descriptions shared by all domains.

use crate::domains::feed::types::PageRequest;
use crate::domains::{snippets, video};
use vidlex_model::ContentId;

/// The main domain message router
#[derive(Debug, Clone)]
pub enum DomainMessage {
    /// Vertical video feed screen
    Video(video::messages::Message),

    /// Phrase snippet carousel (dictionary screen)
    Snippets(snippets::messages::Message),
}

impl From<video::messages::Message> for DomainMessage {
    fn from(msg: video::messages::Message) -> Self {
        DomainMessage::Video(msg)
    }
}

impl From<snippets::messages::Message> for DomainMessage {
    fn from(msg: snippets::messages::Message) -> Self {
        DomainMessage::Snippets(msg)
    }
}

/// Asynchronous work requested by an update handler.
///
/// Update handlers never perform I/O themselves; the runtime executes each
/// effect once and routes the completion back as a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPage(PageRequest),
    FetchDetail(ContentId),
    UpdateLike { id: ContentId, like: bool },
    SearchSnippets { query_id: u64, phrase: String, limit: usize },
}

/// Result of a domain update: the effects to execute next.
#[derive(Debug, Default, PartialEq)]
pub struct DomainUpdateResult {
    pub effects: Vec<Effect>,
}

impl DomainUpdateResult {
    /// Create an empty result
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a result with a single effect
    pub fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
        }
    }

    /// Create a result from an optional effect
    pub fn maybe(effect: Option<Effect>) -> Self {
        Self {
            effects: effect.into_iter().collect(),
        }
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn extend(&mut self, other: DomainUpdateResult) {
        self.effects.extend(other.effects);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
