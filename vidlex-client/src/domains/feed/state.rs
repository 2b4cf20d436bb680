//! Feed store
//!
//! Holds the loaded items in feed order together with paging, loading and
//! detail state. Every operation returns the request the caller has to run,
//! if any; completions come back through the `on_*` methods and are checked
//! against the current reset epoch and item set before they are applied.

use std::collections::{HashMap, HashSet};

use vidlex_model::{
    ContentDetail, ContentId, FeedFilters, FeedItem, FeedPage, LikeUpdate,
};

use super::types::{LoadStatus, PageRequest};
use crate::common::events::{CoreEvent, EventBus};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug)]
pub struct FeedState {
    items: Vec<FeedItem>,
    ids: HashSet<ContentId>,
    cursor: Option<String>,
    has_more: bool,
    status: LoadStatus,
    error: Option<String>,
    filters: FeedFilters,
    epoch: u64,
    details: HashMap<ContentId, ContentDetail>,
    page_size: usize,
    events: EventBus,
}

impl FeedState {
    pub fn new(page_size: usize, events: EventBus) -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            cursor: None,
            has_more: true,
            status: LoadStatus::Idle,
            error: None,
            filters: FeedFilters::default(),
            epoch: 0,
            details: HashMap::new(),
            page_size: page_size.max(1),
            events,
        }
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&FeedItem> {
        self.items.get(index)
    }

    pub fn find(&self, id: &ContentId) -> Option<&FeedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ContentId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &FeedFilters {
        &self.filters
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn detail(&self, id: &ContentId) -> Option<&ContentDetail> {
        self.details.get(id)
    }

    pub fn has_detail(&self, id: &ContentId) -> bool {
        self.details.contains_key(id)
    }

    /// Drop everything and request the first page for `filters`.
    pub fn reset(&mut self, filters: FeedFilters) -> PageRequest {
        self.epoch += 1;
        self.items.clear();
        self.ids.clear();
        self.details.clear();
        self.cursor = None;
        self.error = None;
        self.has_more = true;
        self.filters = filters;

        log::info!(
            "[Feed] Reset to epoch {} with filters {:?}",
            self.epoch,
            self.filters
        );
        self.events.publish(CoreEvent::FeedReset { epoch: self.epoch });
        self.set_status(LoadStatus::LoadingInitial);

        PageRequest {
            epoch: self.epoch,
            cursor: None,
            filters: self.filters.clone(),
            limit: self.page_size,
        }
    }

    /// Reset only when `filters` differ from the active ones.
    pub fn set_filters(&mut self, filters: FeedFilters) -> Option<PageRequest> {
        if filters == self.filters {
            log::debug!("[Feed] Filters unchanged, keeping loaded items");
            return None;
        }
        Some(self.reset(filters))
    }

    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.status.is_loading() {
            log::debug!("[Feed] Load more ignored, {:?}", self.status);
            return None;
        }
        if !self.has_more {
            log::debug!("[Feed] Load more ignored, no more pages");
            return None;
        }

        self.set_status(LoadStatus::LoadingMore);
        Some(PageRequest {
            epoch: self.epoch,
            cursor: self.cursor.clone(),
            filters: self.filters.clone(),
            limit: self.page_size,
        })
    }

    /// Apply a page. Returns the number of newly appended items, or `None`
    /// when the page belonged to an earlier epoch.
    pub fn on_page_loaded(&mut self, epoch: u64, page: FeedPage) -> Option<usize> {
        if epoch != self.epoch {
            log::debug!(
                "[Feed] Discarding page from epoch {} (current {})",
                epoch,
                self.epoch
            );
            return None;
        }

        let has_more = page.continues();
        let received = page.items.len();
        let mut added = 0;
        for item in page.items {
            if self.ids.insert(item.id.clone()) {
                self.items.push(item);
                added += 1;
            }
        }
        if added < received {
            log::debug!(
                "[Feed] Dropped {} duplicate items from page",
                received - added
            );
        }

        self.cursor = page.next_cursor;
        self.has_more = has_more;

        log::info!(
            "[Feed] Appended {} items ({} total), has more: {}",
            added,
            self.items.len(),
            self.has_more
        );
        self.events.publish(CoreEvent::ItemsAppended {
            added,
            total: self.items.len(),
        });
        self.set_status(LoadStatus::Idle);
        Some(added)
    }

    pub fn on_page_failed(&mut self, epoch: u64, reason: String) {
        if epoch != self.epoch {
            log::debug!(
                "[Feed] Discarding failure from epoch {} (current {})",
                epoch,
                self.epoch
            );
            return;
        }
        log::warn!("[Feed] Page load failed: {}", reason);
        self.record_error(reason);
        self.set_status(LoadStatus::Failed);
    }

    /// Id to fetch detail for, when the item is loaded and not yet cached.
    pub fn load_detail(&mut self, id: &ContentId) -> Option<ContentId> {
        if !self.contains(id) || self.has_detail(id) {
            return None;
        }
        Some(id.clone())
    }

    /// Returns whether the detail was stored.
    pub fn on_detail_loaded(
        &mut self,
        id: ContentId,
        detail: ContentDetail,
    ) -> bool {
        if !self.contains(&id) {
            log::debug!("[Feed] Discarding detail for removed item {}", id);
            return false;
        }
        self.details.insert(id.clone(), detail);
        self.events.publish(CoreEvent::DetailLoaded(id));
        true
    }

    pub fn on_detail_failed(&mut self, id: &ContentId, reason: String) {
        log::warn!("[Feed] Detail load for {} failed: {}", id, reason);
        self.record_error(reason);
        if !self.status.is_loading() {
            self.set_status(LoadStatus::Failed);
        }
    }

    /// Request a like change. Nothing changes locally until confirmed.
    pub fn set_like(&mut self, id: &ContentId, like: bool) -> Option<(ContentId, bool)> {
        if !self.contains(id) {
            log::debug!("[Feed] Like for unknown item {} ignored", id);
            return None;
        }
        Some((id.clone(), like))
    }

    pub fn toggle_like(&mut self, id: &ContentId) -> Option<(ContentId, bool)> {
        let next = !self.find(id)?.is_liked;
        self.set_like(id, next)
    }

    pub fn on_like_updated(&mut self, id: &ContentId, update: LikeUpdate) {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id)
        else {
            return;
        };
        item.likes_count = update.likes_count;
        item.is_liked = update.is_liked;
        self.events.publish(CoreEvent::ItemUpdated(id.clone()));
    }

    pub fn on_like_failed(&mut self, id: &ContentId, reason: String) {
        log::warn!("[Feed] Like update for {} failed: {}", id, reason);
        self.record_error(reason);
    }

    /// Record an error without touching items or paging.
    pub fn record_error(&mut self, reason: String) {
        self.error = Some(reason.clone());
        self.events.publish(CoreEvent::ErrorRecorded(reason));
    }

    fn set_status(&mut self, status: LoadStatus) {
        if self.status != status {
            self.status = status;
            self.events.publish(CoreEvent::StatusChanged(status));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidlex_model::{ContentAnalysis, ProficiencyLevel};

    fn item(id: &str) -> FeedItem {
        FeedItem {
            id: ContentId::from(id),
            video_name: format!("video {id}"),
            author: None,
            analysis: ContentAnalysis::default(),
            likes_count: 0,
            is_liked: false,
            video_url: format!("https://cdn/{id}.m3u8"),
        }
    }

    fn page(ids: &[&str], cursor: Option<&str>, has_more: bool) -> FeedPage {
        FeedPage {
            items: ids.iter().map(|id| item(id)).collect(),
            next_cursor: cursor.map(str::to_string),
            has_more,
        }
    }

    fn loaded(ids: &[&str]) -> FeedState {
        let mut state = FeedState::new(DEFAULT_PAGE_SIZE, EventBus::default());
        let request = state.reset(FeedFilters::default());
        state.on_page_loaded(request.epoch, page(ids, Some("c1"), true));
        state
    }

    fn ids(state: &FeedState) -> Vec<&str> {
        state.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn reset_requests_first_page() {
        let mut state = FeedState::new(5, EventBus::default());
        let request = state.reset(FeedFilters::default());
        assert_eq!(request.epoch, 1);
        assert_eq!(request.cursor, None);
        assert_eq!(request.limit, 5);
        assert_eq!(state.status(), LoadStatus::LoadingInitial);
        assert!(state.has_more());
    }

    #[test]
    fn pages_append_without_duplicates() {
        let mut state = loaded(&["a", "b", "c"]);
        let request = state.load_more().unwrap();
        assert_eq!(request.cursor.as_deref(), Some("c1"));
        assert_eq!(state.status(), LoadStatus::LoadingMore);

        let added = state
            .on_page_loaded(request.epoch, page(&["c", "d", "a", "e"], Some("c2"), true));
        assert_eq!(added, Some(2));
        assert_eq!(ids(&state), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(state.cursor(), Some("c2"));
        assert_eq!(state.status(), LoadStatus::Idle);
    }

    #[test]
    fn missing_cursor_ends_paging() {
        let mut state = FeedState::new(5, EventBus::default());
        let request = state.reset(FeedFilters::default());
        state.on_page_loaded(request.epoch, page(&["a"], None, true));
        assert!(!state.has_more());
        assert_eq!(state.load_more(), None);
    }

    #[test]
    fn load_more_is_guarded_while_loading() {
        let mut state = FeedState::new(5, EventBus::default());
        state.reset(FeedFilters::default());
        assert_eq!(state.load_more(), None);

        let mut state = loaded(&["a"]);
        assert!(state.load_more().is_some());
        assert_eq!(state.load_more(), None);
    }

    #[test]
    fn filter_change_clears_everything() {
        let mut state = loaded(&["a", "b"]);
        state.on_detail_loaded(ContentId::from("a"), ContentDetail::default());

        let filters =
            FeedFilters::default().with_levels(vec![ProficiencyLevel::B1]);
        let request = state.set_filters(filters.clone()).unwrap();
        assert_eq!(request.epoch, 2);
        assert_eq!(request.cursor, None);
        assert_eq!(request.filters, filters);
        assert!(state.is_empty());
        assert_eq!(state.cursor(), None);
        assert!(!state.has_detail(&ContentId::from("a")));
        assert_eq!(state.status(), LoadStatus::LoadingInitial);

        assert_eq!(state.set_filters(filters), None);
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut state = loaded(&["a"]);
        let old = state.load_more().unwrap();
        state.reset(FeedFilters::default().with_adult_content(false));

        assert_eq!(state.on_page_loaded(old.epoch, page(&["x"], Some("z"), true)), None);
        state.on_page_failed(old.epoch, "boom".into());
        assert!(state.is_empty());
        assert_eq!(state.status(), LoadStatus::LoadingInitial);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn page_failure_keeps_items() {
        let mut state = loaded(&["a"]);
        let request = state.load_more().unwrap();
        state.on_page_failed(request.epoch, "offline".into());
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(state.error(), Some("offline"));
        assert_eq!(ids(&state), vec!["a"]);
        assert!(state.load_more().is_some());
    }

    #[test]
    fn detail_requires_present_uncached_item() {
        let mut state = loaded(&["a"]);
        let a = ContentId::from("a");
        assert_eq!(state.load_detail(&ContentId::from("zz")), None);
        assert_eq!(state.load_detail(&a), Some(a.clone()));

        assert!(state.on_detail_loaded(a.clone(), ContentDetail::default()));
        assert_eq!(state.load_detail(&a), None);
    }

    #[test]
    fn detail_for_removed_item_is_discarded() {
        let mut state = loaded(&["a"]);
        state.reset(FeedFilters::default());
        assert!(!state.on_detail_loaded(ContentId::from("a"), ContentDetail::default()));
        assert!(!state.has_detail(&ContentId::from("a")));
    }

    #[test]
    fn detail_failure_does_not_override_page_loading() {
        let mut state = loaded(&["a"]);
        state.load_more();
        state.on_detail_failed(&ContentId::from("a"), "nope".into());
        assert_eq!(state.status(), LoadStatus::LoadingMore);
        assert_eq!(state.error(), Some("nope"));

        let mut state = loaded(&["a"]);
        state.on_detail_failed(&ContentId::from("a"), "nope".into());
        assert_eq!(state.status(), LoadStatus::Failed);
    }

    #[test]
    fn likes_apply_only_on_confirmation() {
        let mut state = loaded(&["a"]);
        let a = ContentId::from("a");
        assert_eq!(state.toggle_like(&a), Some((a.clone(), true)));
        assert!(!state.find(&a).unwrap().is_liked);

        state.on_like_updated(&a, LikeUpdate { likes_count: 7, is_liked: true });
        let item = state.find(&a).unwrap();
        assert_eq!((item.likes_count, item.is_liked), (7, true));
        assert_eq!(state.toggle_like(&a), Some((a.clone(), false)));

        state.on_like_failed(&a, "rate limited".into());
        assert_eq!(state.error(), Some("rate limited"));
        assert!(state.find(&a).unwrap().is_liked);
    }

    #[test]
    fn changes_are_published() {
        let events = EventBus::default();
        let mut rx = events.subscribe();
        let mut state = FeedState::new(5, events);
        let request = state.reset(FeedFilters::default());
        state.on_page_loaded(request.epoch, page(&["a"], None, false));

        assert_eq!(rx.try_recv().unwrap(), CoreEvent::FeedReset { epoch: 1 });
        assert_eq!(
            rx.try_recv().unwrap(),
            CoreEvent::StatusChanged(LoadStatus::LoadingInitial)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CoreEvent::ItemsAppended { added: 1, total: 1 }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CoreEvent::StatusChanged(LoadStatus::Idle)
        );
    }
}
