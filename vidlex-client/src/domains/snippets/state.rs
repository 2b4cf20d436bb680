use vidlex_model::{PhraseSearchResult, PhraseSnippet};

use crate::common::events::{CoreEvent, EventBus};
use crate::common::messages::Effect;
use crate::domains::player::{MediaBackend, PlaybackController, PlaybackTarget};

pub const DEFAULT_SNIPPET_PAGE_SIZE: usize = 12;

#[derive(Debug)]
pub struct SnippetCarousel<B: MediaBackend> {
    pub player: PlaybackController<B>,
    snippets: Vec<PhraseSnippet>,
    phrase: String,
    total: usize,
    query_id: u64,
    loading: bool,
    error: Option<String>,
    active: Option<usize>,
    width: f32,
    page_size: usize,
    events: EventBus,
}

impl<B: MediaBackend> SnippetCarousel<B> {
    pub fn new(
        player: PlaybackController<B>,
        page_size: usize,
        events: EventBus,
    ) -> Self {
        Self {
            player,
            snippets: Vec::new(),
            phrase: String::new(),
            total: 0,
            query_id: 0,
            loading: false,
            error: None,
            active: None,
            width: 0.0,
            page_size: page_size.max(1),
            events,
        }
    }

    pub fn snippets(&self) -> &[PhraseSnippet] {
        &self.snippets
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_snippet(&self) -> Option<&PhraseSnippet> {
        self.active.and_then(|i| self.snippets.get(i))
    }

    /// `"3/8"` style position label, `"0/0"` when empty.
    pub fn counter_label(&self) -> String {
        match self.active {
            Some(index) if !self.snippets.is_empty() => {
                format!("{}/{}", index + 1, self.snippets.len())
            }
            _ => "0/0".to_string(),
        }
    }

    /// Start a new search. Earlier in-flight results become stale.
    pub fn search(&mut self, phrase: &str) -> Option<Effect> {
        let phrase = phrase.trim();
        self.query_id += 1;
        self.error = None;
        if phrase.is_empty() {
            self.phrase.clear();
            self.loading = false;
            self.replace(Vec::new(), 0);
            return None;
        }

        self.phrase = phrase.to_string();
        self.loading = true;
        log::debug!("[Snippets] Searching {:?} (#{})", phrase, self.query_id);
        Some(Effect::SearchSnippets {
            query_id: self.query_id,
            phrase: self.phrase.clone(),
            limit: self.page_size,
        })
    }

    pub fn on_results(&mut self, query_id: u64, result: PhraseSearchResult) {
        if query_id != self.query_id {
            log::debug!("[Snippets] Discarding results of query #{}", query_id);
            return;
        }
        self.loading = false;
        log::info!(
            "[Snippets] {} of {} snippets for {:?}",
            result.items.len(),
            result.total,
            result.phrase
        );
        self.replace(result.items, result.total);
    }

    pub fn on_search_failed(&mut self, query_id: u64, reason: String) {
        if query_id != self.query_id {
            return;
        }
        log::warn!("[Snippets] Search failed: {}", reason);
        self.loading = false;
        self.error = Some(reason.clone());
        self.events.publish(CoreEvent::ErrorRecorded(reason));
    }

    pub fn on_layout(&mut self, width: f32) {
        if width.is_finite() {
            self.width = width;
        }
    }

    /// Horizontal paging settled at `offset_x`.
    pub fn on_momentum_end(&mut self, offset_x: f32) {
        if self.width <= 0.0 || self.snippets.is_empty() {
            return;
        }
        let last = self.snippets.len() as i64 - 1;
        let index = ((offset_x / self.width).round() as i64).clamp(0, last);
        self.activate(Some(index as usize));
    }

    /// Drop the results and release the media session. In-flight searches
    /// become stale, so a late response cannot bind again.
    pub fn close(&mut self) {
        self.query_id += 1;
        self.loading = false;
        self.error = None;
        self.phrase.clear();
        self.replace(Vec::new(), 0);
    }

    fn replace(&mut self, snippets: Vec<PhraseSnippet>, total: usize) {
        self.snippets = snippets;
        self.total = total;
        self.active = None;
        let first = (!self.snippets.is_empty()).then_some(0);
        if first.is_none() {
            self.player.unbind();
            self.events.publish(CoreEvent::SnippetActivated { index: None });
            return;
        }
        self.activate(first);
    }

    fn activate(&mut self, index: Option<usize>) {
        if index == self.active {
            return;
        }
        self.active = index;

        let target = self
            .active_snippet()
            .map(PlaybackTarget::windowed)
            .transpose();
        match target {
            Ok(Some(target)) => {
                if let Err(e) = self.player.bind(target) {
                    log::warn!("[Snippets] Could not bind snippet: {}", e);
                    self.error = Some(e.to_string());
                }
            }
            Ok(None) => self.player.unbind(),
            Err(e) => {
                log::warn!("[Snippets] Skipping snippet with bad window: {}", e);
                self.player.unbind();
            }
        }
        self.events
            .publish(CoreEvent::SnippetActivated { index: self.active });
    }
}
